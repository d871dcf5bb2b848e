//! Raw, section-keyed view of a git configuration.
//!
//! Every key/value pair lives here, including the ones the typed
//! [`GitConfig`](super::GitConfig) tree also models. Keys are stored the way
//! `git config --list` reports them: section and variable names lowercased,
//! subsection names verbatim. A key may hold several values (`remote.*.fetch`,
//! `url.*.insteadOf`); readers take the last one, as git does.

use std::fmt;

use indexmap::IndexMap;

/// `[section]` or `[section "subsection"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId {
    pub name: String,
    pub subsection: Option<String>,
}

impl SectionId {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            subsection: None,
        }
    }

    pub fn with_subsection(name: &str, subsection: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            subsection: Some(subsection.to_string()),
        }
    }

    /// Split a dotted key (`remote.origin.url`) into its section and variable.
    ///
    /// The subsection is everything between the first and last dot, so
    /// `url.https://example.com/.insteadof` keeps its dots.
    pub fn parse_key(key: &str) -> Option<(Self, String)> {
        let (name, rest) = key.split_once('.')?;
        let (subsection, variable) = match rest.rsplit_once('.') {
            Some((sub, var)) => (Some(sub.to_string()), var),
            None => (None, rest),
        };
        if name.is_empty() || variable.is_empty() {
            return None;
        }
        Some((
            Self {
                name: name.to_ascii_lowercase(),
                subsection,
            },
            variable.to_ascii_lowercase(),
        ))
    }

    /// Full dotted key for a variable in this section.
    pub fn key(&self, variable: &str) -> String {
        match &self.subsection {
            Some(sub) => format!("{}.{}.{}", self.name, sub, variable),
            None => format!("{}.{}", self.name, variable),
        }
    }

    fn header(&self) -> String {
        match &self.subsection {
            Some(sub) => {
                let escaped = sub.replace('\\', "\\\\").replace('"', "\\\"");
                format!("[{} \"{}\"]", self.name, escaped)
            }
            None => format!("[{}]", self.name),
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subsection {
            Some(sub) => write!(f, "{}.{}", self.name, sub),
            None => f.write_str(&self.name),
        }
    }
}

/// Variables of one section, in file order, each with all of its values.
pub type RawSection = IndexMap<String, Vec<String>>;

/// All sections of a configuration, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    sections: IndexMap<SectionId, RawSection>,
}

impl RawConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the output of `git config --list --null`.
    ///
    /// Entries are NUL-terminated; key and value are separated by the first
    /// newline. An entry with no newline is a valueless key, which git reads
    /// as boolean `true`. Malformed keys are skipped with a debug log.
    pub fn parse_list(output: &str) -> Self {
        let mut raw = Self::new();
        for entry in output.split('\0').filter(|e| !e.is_empty()) {
            let (key, value) = entry.split_once('\n').unwrap_or((entry, "true"));
            match SectionId::parse_key(key) {
                Some((section, variable)) => raw.add(&section, &variable, value),
                None => log::debug!("Skipping malformed config key: {key}"),
            }
        }
        raw
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, id: &SectionId) -> Option<&RawSection> {
        self.sections.get(id)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&SectionId, &RawSection)> {
        self.sections.iter()
    }

    /// Sections called `name`, any subsection.
    pub fn sections_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = (&'a SectionId, &'a RawSection)> + 'a {
        self.sections.iter().filter(move |(id, _)| id.name == name)
    }

    /// Last value of a variable, as git resolves it.
    pub fn get(&self, section: &SectionId, variable: &str) -> Option<&str> {
        self.get_all(section, variable).last().map(String::as_str)
    }

    pub fn get_all(&self, section: &SectionId, variable: &str) -> &[String] {
        self.sections
            .get(section)
            .and_then(|s| s.get(variable))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Append a value, keeping existing ones.
    pub fn add(&mut self, section: &SectionId, variable: &str, value: &str) {
        self.sections
            .entry(section.clone())
            .or_default()
            .entry(variable.to_ascii_lowercase())
            .or_default()
            .push(value.to_string());
    }

    /// Replace all values of a variable with one value.
    pub fn set(&mut self, section: &SectionId, variable: &str, value: &str) {
        self.set_all(section, variable, vec![value.to_string()]);
    }

    /// Replace all values of a variable. An empty list removes it.
    pub fn set_all(&mut self, section: &SectionId, variable: &str, values: Vec<String>) {
        if values.is_empty() {
            self.remove(section, variable);
            return;
        }
        self.sections
            .entry(section.clone())
            .or_default()
            .insert(variable.to_ascii_lowercase(), values);
    }

    /// Remove a variable; drops the section once it has no variables left.
    pub fn remove(&mut self, section: &SectionId, variable: &str) {
        let Some(entries) = self.sections.get_mut(section) else {
            return;
        };
        entries.shift_remove(&variable.to_ascii_lowercase());
        if entries.is_empty() {
            self.sections.shift_remove(section);
        }
    }

    /// Replace every `[name "..."]` section with `src`'s sections of that
    /// name. The plain `[name]` section is not a list entry and stays.
    ///
    /// The replacements take the position of the first section they replace,
    /// so replacing with the same sections twice keeps the file order.
    pub fn replace_subsections_named(&mut self, src: &RawConfig, name: &str) {
        let is_entry = |id: &SectionId| id.name == name && id.subsection.is_some();
        let position = self.sections.keys().position(is_entry);
        self.sections.retain(|id, _| !is_entry(id));
        let mut index = position.unwrap_or(self.sections.len());
        for (id, entries) in src.sections.iter().filter(|(id, _)| is_entry(*id)) {
            self.sections.shift_insert(index, id.clone(), entries.clone());
            index += 1;
        }
    }

    /// Fold `src`'s variables into this config wherever `include` accepts the
    /// section. Source values win on conflict unless they are empty.
    ///
    /// This is a key-wise override, not an accumulation, so folding the same
    /// source twice gives the same result as folding it once.
    pub fn fold_from(&mut self, src: &RawConfig, include: impl Fn(&SectionId) -> bool) {
        for (id, entries) in src.sections.iter().filter(|(id, _)| include(id)) {
            for (variable, values) in entries {
                if values.iter().all(String::is_empty) {
                    continue;
                }
                self.set_all(id, variable, values.clone());
            }
        }
    }

    /// Flattened `(dotted key, values)` pairs, in file order.
    pub fn entries(&self) -> impl Iterator<Item = (String, &[String])> {
        self.sections.iter().flat_map(|(id, entries)| {
            entries
                .iter()
                .map(move |(variable, values)| (id.key(variable), values.as_slice()))
        })
    }

    /// Render in git-config file syntax.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (id, entries) in &self.sections {
            out.push_str(&id.header());
            out.push('\n');
            for (variable, values) in entries {
                for value in values {
                    out.push_str(&format!("\t{} = {}\n", variable, quote_value(value)));
                }
            }
        }
        out
    }
}

/// Quote a value for git-config syntax when it would not survive unquoted.
fn quote_value(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\t', "\\t");
    let needs_quotes = value.is_empty()
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace)
        || value.contains(['#', ';']);
    if needs_quotes {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}
