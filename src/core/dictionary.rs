//! The localized-string dictionary: `section → (short key → string)`.
//!
//! Loaded wholesale, mutated in memory by a single owner, written back
//! wholesale. Key order is preserved and non-ASCII text is written verbatim.

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

/// A dotted label key split into its two parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DottedKey<'a> {
    pub section: &'a str,
    pub key: &'a str,
}

impl<'a> DottedKey<'a> {
    /// Parse `section.key`. Anything other than exactly two non-empty
    /// dot-separated parts is rejected.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let mut parts = raw.split('.');
        let section = parts.next()?;
        let key = parts.next()?;
        if parts.next().is_some() || section.is_empty() || key.is_empty() {
            return None;
        }
        Some(Self { section, key })
    }
}

impl std::fmt::Display for DottedKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.section, self.key)
    }
}

/// Outcome of looking a dotted key up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Translated(&'a str),
    /// Present, but an empty placeholder.
    Empty,
    Absent,
    /// Not of the `section.key` shape.
    Malformed,
}

impl Resolution<'_> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Translated(_))
    }
}

/// Why a section could not be opened for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionConflict {
    pub section: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    root: Map<String, Value>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an already-parsed JSON document. The root must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => bail!("Root of the dictionary must be an object"),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dictionary: {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse dictionary: {}", path.display()))?;
        Self::from_value(value).with_context(|| format!("Invalid dictionary: {}", path.display()))
    }

    /// Look up a raw dotted key.
    pub fn resolve(&self, raw: &str) -> Resolution<'_> {
        let Some(dotted) = DottedKey::parse(raw) else {
            return Resolution::Malformed;
        };
        match self
            .root
            .get(dotted.section)
            .and_then(Value::as_object)
            .and_then(|section| section.get(dotted.key))
        {
            Some(Value::String(s)) if s.is_empty() => Resolution::Empty,
            Some(Value::String(s)) => Resolution::Translated(s),
            _ => Resolution::Absent,
        }
    }

    /// Whether `section.key` exists at all, whatever its value.
    pub fn contains(&self, dotted: &DottedKey) -> bool {
        self.root
            .get(dotted.section)
            .and_then(Value::as_object)
            .is_some_and(|section| section.contains_key(dotted.key))
    }

    /// The section mapping, created empty if absent.
    ///
    /// Fails when the name is already taken by something that is not a mapping;
    /// that value is never replaced.
    pub fn section_mut(&mut self, section: &str) -> Result<&mut Map<String, Value>, SectionConflict> {
        self.root
            .entry(section.to_string())
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| SectionConflict {
                section: section.to_string(),
            })
    }

    pub fn section_count(&self) -> usize {
        self.root.len()
    }

    /// Pretty JSON (2-space indent) with a trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let content = serde_json::to_string_pretty(&self.root)
            .context("Failed to serialize dictionary")?;
        Ok(format!("{}\n", content))
    }

    /// Write the whole dictionary in one operation.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path, self.to_json_string()?)
            .with_context(|| format!("Failed to write dictionary: {}", path.display()))
    }
}
