//! The profile store: every profile in the profile directory, by name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ProfileError;
use crate::merge::Merge;

use super::Profile;

/// File extensions recognized as profiles. `tml` is an older spelling.
pub const PROFILE_EXTENSIONS: &[&str] = &["toml", "tml"];

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Profile name for a directory entry: the file name without its extension,
/// or `None` when the extension isn't a profile extension.
pub fn profile_name(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?;
    if !PROFILE_EXTENSIONS.contains(&extension) {
        return None;
    }
    path.file_stem()?.to_str().map(str::to_string)
}

#[derive(Debug, Clone)]
struct StoredProfile {
    path: PathBuf,
    profile: Profile,
}

/// All profiles discovered for one invocation, keyed by name.
///
/// Built once by [`ProfileStore::scan`] and read-only afterwards. Names are
/// unique: two files deriving the same name make the scan fail.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    dir: PathBuf,
    profiles: BTreeMap<String, StoredProfile>,
}

impl ProfileStore {
    /// Scan `dir` for profile files, deserializing them as TOML.
    pub fn scan(dir: &Path) -> anyhow::Result<Self> {
        Self::scan_with(dir, Profile::from_toml)
    }

    /// Scan `dir` for profile files using a custom deserializer.
    ///
    /// Subdirectories and files with other extensions are skipped. The scan
    /// fails as a whole, before anything is applied, when the directory
    /// can't be read, when two files derive the same name, or when any one
    /// file fails to deserialize.
    pub fn scan_with<F>(dir: &Path, deserialize: F) -> anyhow::Result<Self>
    where
        F: Fn(&[u8]) -> anyhow::Result<Profile>,
    {
        let unreadable = |e: std::io::Error| ProfileError::ProfilesDirUnreadable {
            path: dir.to_path_buf(),
            error: e.to_string(),
        };

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(unreadable)? {
            let entry = entry.map_err(unreadable)?;
            if entry.file_type().map_err(unreadable)?.is_dir() {
                continue;
            }
            paths.push(entry.path());
        }
        // read_dir order is platform-dependent; sort so duplicate reports are stable
        paths.sort();

        let mut profiles: BTreeMap<String, StoredProfile> = BTreeMap::new();
        for path in paths {
            let Some(name) = profile_name(&path) else {
                log::debug!("Skipping non-profile file {}", path.display());
                continue;
            };
            if let Some(existing) = profiles.get(&name) {
                return Err(ProfileError::DuplicateProfile {
                    name,
                    first: existing.path.clone(),
                    second: path,
                }
                .into());
            }

            let invalid = |error: String| ProfileError::InvalidProfile {
                path: path.clone(),
                error,
            };
            let bytes = std::fs::read(&path).map_err(|e| invalid(e.to_string()))?;
            let profile = deserialize(&bytes).map_err(|e| invalid(format!("{e:#}")))?;

            log::debug!("Found profile {name} at {}", path.display());
            profiles.insert(name, StoredProfile { path, profile });
        }

        log::info!(
            "Loaded {} profile(s) from {}",
            profiles.len(),
            dir.display()
        );
        Ok(Self {
            dir: dir.to_path_buf(),
            profiles,
        })
    }

    /// The directory this store was scanned from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Profile names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Profile)> {
        self.profiles
            .iter()
            .map(|(name, stored)| (name.as_str(), &stored.profile))
    }

    /// The file a profile was loaded from.
    pub fn path_of(&self, name: &str) -> Option<&Path> {
        self.profiles.get(name).map(|s| s.path.as_path())
    }

    /// Look up a profile by name.
    pub fn get(&self, name: &str) -> Result<&Profile, ProfileError> {
        self.profiles
            .get(name)
            .map(|stored| &stored.profile)
            .ok_or_else(|| ProfileError::ProfileNotFound {
                name: name.to_string(),
                available: self.profiles.keys().cloned().collect(),
                suggestion: self.closest_name(name),
            })
    }

    /// Look up several profiles and layer them left to right, later ones
    /// overriding earlier ones field by field.
    ///
    /// Every name is checked before anything is merged, so an unknown name
    /// fails the whole selection.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> anyhow::Result<Profile> {
        let profiles = names
            .iter()
            .map(|name| self.get(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(profiles
            .into_iter()
            .fold(Profile::default(), |acc, p| acc.merge_with(p)))
    }

    fn closest_name(&self, name: &str) -> Option<String> {
        self.profiles
            .keys()
            .map(|candidate| (strsim::jaro_winkler(name, candidate), candidate))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, candidate)| candidate.clone())
    }
}
