//! Typed git configuration tree and the structural merge.
//!
//! [`GitConfig`] models the sections git-profile reasons about (core, user,
//! committer, author, init, remotes, branches, URL rewrites) as named fields
//! and keeps every key, modeled or not, in a [`RawConfig`]. Both views are
//! kept consistent: every merge step that touches a named section re-projects
//! that section into the raw mapping before the next step runs.
//!
//! # Merge rules
//!
//! Merging a source into a destination ([`GitConfig::merge_from`]):
//!
//! | Section | Rule |
//! |---|---|
//! | `core.bare` | copied when the source sets it (true or false) |
//! | other scalar fields | copied when the source value is non-empty |
//! | remotes, branches, URL rewrites | a present source list replaces the destination list wholesale |
//! | everything else, including plain `[branch]` and `[remote]` | key-wise fold, non-empty source values win |

use crate::merge::{Merge, merge_flag, merge_string, replace_list};

use super::raw::{RawConfig, SectionId};

/// Plain sections with named fields on [`GitConfig`].
const NAMED_SECTIONS: &[&str] = &["core", "user", "committer", "author", "init"];

/// Sections whose `[name "..."]` entries form a list on [`GitConfig`].
const LIST_SECTIONS: &[&str] = &["remote", "branch", "url"];

/// Whether a section is covered by a named field or a list.
///
/// Section-level keys of list sections (`branch.autoSetupMerge`,
/// `remote.pushDefault`) are not list entries, and are carried only in the
/// raw mapping like any other unmodeled key.
fn is_modeled(id: &SectionId) -> bool {
    let name = id.name.as_str();
    match id.subsection {
        None => NAMED_SECTIONS.contains(&name),
        Some(_) => LIST_SECTIONS.contains(&name),
    }
}

/// Parse a git boolean (`true`/`yes`/`on`/`1`, `false`/`no`/`off`/`0`/empty).
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" | "" => Some(false),
        _ => None,
    }
}

fn read_string(raw: &RawConfig, id: &SectionId, variable: &str) -> String {
    raw.get(id, variable).unwrap_or_default().to_string()
}

fn read_flag(raw: &RawConfig, id: &SectionId, variable: &str) -> Option<bool> {
    raw.get(id, variable).and_then(parse_bool)
}

/// Empty means unset, so the key is removed rather than written as `""`.
fn write_string(raw: &mut RawConfig, id: &SectionId, variable: &str, value: &str) {
    if value.is_empty() {
        raw.remove(id, variable);
    } else {
        raw.set(id, variable, value);
    }
}

/// Leaves an existing spelling (`yes`, `on`, `1`) alone when it already means
/// the same thing.
fn write_flag(raw: &mut RawConfig, id: &SectionId, variable: &str, value: Option<bool>) {
    if value.is_some() && read_flag(raw, id, variable) == value {
        return;
    }
    match value {
        Some(flag) => raw.set(id, variable, if flag { "true" } else { "false" }),
        None => raw.remove(id, variable),
    }
}

/// A section with named fields that maps onto one raw section.
trait NamedSection: Merge {
    fn read(raw: &RawConfig, id: &SectionId) -> Self;
    fn write(&self, raw: &mut RawConfig, id: &SectionId);
}

/// One entry of a list-valued section (`[remote "origin"]`, `[branch "main"]`).
trait ListEntry: Clone {
    const SECTION: &'static str;
    fn read(raw: &RawConfig, id: &SectionId) -> Self;
    fn write(&self, raw: &mut RawConfig);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Core {
    pub is_bare: Option<bool>,
    pub worktree: String,
    pub comment_char: String,
    pub repository_format_version: String,
}

impl Merge for Core {
    fn merge_with(&self, overlay: &Self) -> Self {
        Self {
            is_bare: merge_flag(self.is_bare, overlay.is_bare),
            worktree: merge_string(&self.worktree, &overlay.worktree),
            comment_char: merge_string(&self.comment_char, &overlay.comment_char),
            repository_format_version: merge_string(
                &self.repository_format_version,
                &overlay.repository_format_version,
            ),
        }
    }
}

impl NamedSection for Core {
    fn read(raw: &RawConfig, id: &SectionId) -> Self {
        Self {
            is_bare: read_flag(raw, id, "bare"),
            worktree: read_string(raw, id, "worktree"),
            comment_char: read_string(raw, id, "commentchar"),
            repository_format_version: read_string(raw, id, "repositoryformatversion"),
        }
    }

    fn write(&self, raw: &mut RawConfig, id: &SectionId) {
        write_flag(raw, id, "bare", self.is_bare);
        write_string(raw, id, "worktree", &self.worktree);
        write_string(raw, id, "commentchar", &self.comment_char);
        write_string(
            raw,
            id,
            "repositoryformatversion",
            &self.repository_format_version,
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
    pub signing_key: String,
}

impl Merge for User {
    fn merge_with(&self, overlay: &Self) -> Self {
        Self {
            name: merge_string(&self.name, &overlay.name),
            email: merge_string(&self.email, &overlay.email),
            signing_key: merge_string(&self.signing_key, &overlay.signing_key),
        }
    }
}

impl NamedSection for User {
    fn read(raw: &RawConfig, id: &SectionId) -> Self {
        Self {
            name: read_string(raw, id, "name"),
            email: read_string(raw, id, "email"),
            signing_key: read_string(raw, id, "signingkey"),
        }
    }

    fn write(&self, raw: &mut RawConfig, id: &SectionId) {
        write_string(raw, id, "name", &self.name);
        write_string(raw, id, "email", &self.email);
        write_string(raw, id, "signingkey", &self.signing_key);
    }
}

/// `[author]` and `[committer]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Merge for Identity {
    fn merge_with(&self, overlay: &Self) -> Self {
        Self {
            name: merge_string(&self.name, &overlay.name),
            email: merge_string(&self.email, &overlay.email),
        }
    }
}

impl NamedSection for Identity {
    fn read(raw: &RawConfig, id: &SectionId) -> Self {
        Self {
            name: read_string(raw, id, "name"),
            email: read_string(raw, id, "email"),
        }
    }

    fn write(&self, raw: &mut RawConfig, id: &SectionId) {
        write_string(raw, id, "name", &self.name);
        write_string(raw, id, "email", &self.email);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Init {
    pub default_branch: String,
}

impl Merge for Init {
    fn merge_with(&self, overlay: &Self) -> Self {
        Self {
            default_branch: merge_string(&self.default_branch, &overlay.default_branch),
        }
    }
}

impl NamedSection for Init {
    fn read(raw: &RawConfig, id: &SectionId) -> Self {
        Self {
            default_branch: read_string(raw, id, "defaultbranch"),
        }
    }

    fn write(&self, raw: &mut RawConfig, id: &SectionId) {
        write_string(raw, id, "defaultbranch", &self.default_branch);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub urls: Vec<String>,
    pub fetch: Vec<String>,
    pub mirror: Option<bool>,
}

impl ListEntry for Remote {
    const SECTION: &'static str = "remote";

    fn read(raw: &RawConfig, id: &SectionId) -> Self {
        Self {
            name: id.subsection.clone().unwrap_or_default(),
            urls: raw.get_all(id, "url").to_vec(),
            fetch: raw.get_all(id, "fetch").to_vec(),
            mirror: read_flag(raw, id, "mirror"),
        }
    }

    fn write(&self, raw: &mut RawConfig) {
        let id = SectionId::with_subsection(Self::SECTION, &self.name);
        raw.set_all(&id, "url", self.urls.clone());
        raw.set_all(&id, "fetch", self.fetch.clone());
        write_flag(raw, &id, "mirror", self.mirror);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
    pub remote: String,
    pub merge: String,
    pub rebase: String,
}

impl ListEntry for Branch {
    const SECTION: &'static str = "branch";

    fn read(raw: &RawConfig, id: &SectionId) -> Self {
        Self {
            name: id.subsection.clone().unwrap_or_default(),
            remote: read_string(raw, id, "remote"),
            merge: read_string(raw, id, "merge"),
            rebase: read_string(raw, id, "rebase"),
        }
    }

    fn write(&self, raw: &mut RawConfig) {
        let id = SectionId::with_subsection(Self::SECTION, &self.name);
        write_string(raw, &id, "remote", &self.remote);
        write_string(raw, &id, "merge", &self.merge);
        write_string(raw, &id, "rebase", &self.rebase);
    }
}

/// `[url "<base>"] insteadOf = <prefix>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlRewrite {
    pub base: String,
    pub instead_of: Vec<String>,
}

impl ListEntry for UrlRewrite {
    const SECTION: &'static str = "url";

    fn read(raw: &RawConfig, id: &SectionId) -> Self {
        Self {
            base: id.subsection.clone().unwrap_or_default(),
            instead_of: raw.get_all(id, "insteadof").to_vec(),
        }
    }

    fn write(&self, raw: &mut RawConfig) {
        let id = SectionId::with_subsection(Self::SECTION, &self.base);
        raw.set_all(&id, "insteadof", self.instead_of.clone());
    }
}

fn read_list<T: ListEntry>(raw: &RawConfig) -> Option<Vec<T>> {
    let entries: Vec<T> = raw
        .sections_named(T::SECTION)
        .filter(|(id, _)| id.subsection.is_some())
        .map(|(id, _)| T::read(raw, id))
        .collect();
    (!entries.is_empty()).then_some(entries)
}

/// Named-field merge, raw fold and re-projection for one scalar section, as
/// a single step.
fn merge_named<T: NamedSection>(
    dest: &mut T,
    dest_raw: &mut RawConfig,
    src: &T,
    src_raw: &RawConfig,
    section: &str,
) {
    let id = SectionId::new(section);
    *dest = dest.merge_with(src);
    dest_raw.fold_from(src_raw, |s| *s == id);
    dest.write(dest_raw, &id);
}

/// Replace-if-present for one list section, raw sections included.
fn replace_entries<T: ListEntry>(
    dest: &mut Option<Vec<T>>,
    dest_raw: &mut RawConfig,
    src: &Option<Vec<T>>,
    src_raw: &RawConfig,
) {
    let Some(entries) = src else {
        return;
    };
    *dest = replace_list(dest, src);
    dest_raw.replace_subsections_named(src_raw, T::SECTION);
    for entry in entries {
        entry.write(dest_raw);
    }
}

/// A git configuration: typed sections plus the raw mapping of every key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitConfig {
    pub core: Core,
    pub user: User,
    pub committer: Identity,
    pub author: Identity,
    pub init: Init,
    /// `None` when the configuration has no remote sections at all.
    pub remotes: Option<Vec<Remote>>,
    pub branches: Option<Vec<Branch>>,
    pub urls: Option<Vec<UrlRewrite>>,
    pub raw: RawConfig,
}

impl GitConfig {
    /// Build the typed tree from a raw mapping.
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            core: Core::read(&raw, &SectionId::new("core")),
            user: User::read(&raw, &SectionId::new("user")),
            committer: Identity::read(&raw, &SectionId::new("committer")),
            author: Identity::read(&raw, &SectionId::new("author")),
            init: Init::read(&raw, &SectionId::new("init")),
            remotes: read_list(&raw),
            branches: read_list(&raw),
            urls: read_list(&raw),
            raw,
        }
    }

    /// Parse the output of `git config --list --null`.
    pub fn parse_list(output: &str) -> Self {
        Self::from_raw(RawConfig::parse_list(output))
    }

    /// Write every named field into the raw mapping.
    ///
    /// Call after building or editing the typed fields directly, so readers
    /// of [`GitConfig::raw`] see the same values.
    pub fn sync_raw(&mut self) {
        self.core.write(&mut self.raw, &SectionId::new("core"));
        self.user.write(&mut self.raw, &SectionId::new("user"));
        self.committer
            .write(&mut self.raw, &SectionId::new("committer"));
        self.author.write(&mut self.raw, &SectionId::new("author"));
        self.init.write(&mut self.raw, &SectionId::new("init"));
        for remote in self.remotes.iter().flatten() {
            remote.write(&mut self.raw);
        }
        for branch in self.branches.iter().flatten() {
            branch.write(&mut self.raw);
        }
        for url in self.urls.iter().flatten() {
            url.write(&mut self.raw);
        }
    }

    /// Merge `src` into this configuration in place.
    ///
    /// Each section is merged independently; see the module docs for the
    /// per-section rules. Merging the same source twice leaves the result
    /// unchanged.
    pub fn merge_from(&mut self, src: &GitConfig) {
        merge_named(&mut self.core, &mut self.raw, &src.core, &src.raw, "core");
        merge_named(&mut self.user, &mut self.raw, &src.user, &src.raw, "user");
        merge_named(
            &mut self.committer,
            &mut self.raw,
            &src.committer,
            &src.raw,
            "committer",
        );
        merge_named(
            &mut self.author,
            &mut self.raw,
            &src.author,
            &src.raw,
            "author",
        );
        merge_named(&mut self.init, &mut self.raw, &src.init, &src.raw, "init");

        self.raw
            .fold_from(&src.raw, |id| !is_modeled(id));

        replace_entries(&mut self.remotes, &mut self.raw, &src.remotes, &src.raw);
        replace_entries(&mut self.branches, &mut self.raw, &src.branches, &src.raw);
        replace_entries(&mut self.urls, &mut self.raw, &src.urls, &src.raw);
    }

    /// Render in git-config file syntax.
    pub fn render(&self) -> String {
        self.raw.render()
    }
}

impl Merge for GitConfig {
    fn merge_with(&self, overlay: &Self) -> Self {
        let mut merged = self.clone();
        merged.merge_from(overlay);
        merged
    }
}
