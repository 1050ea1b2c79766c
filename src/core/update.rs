//! Dictionary updater: backfills missing keys without touching existing ones.

use std::path::Path;

use serde_json::Value;

use crate::{
    core::{
        dictionary::{Dictionary, DottedKey},
        tables::curated_translation,
    },
    utils::humanize_key,
};

/// Where an inserted value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// From the curated translation table.
    Curated,
    /// Derived from the camelCase short key.
    Generated,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::Curated => write!(f, "curated"),
            ValueSource::Generated => write!(f, "generated"),
        }
    }
}

/// What happened to one requested key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Inserted {
        key: String,
        value: String,
        source: ValueSource,
    },
    /// Already in the dictionary (possibly inserted earlier in this run).
    AlreadyPresent { key: String },
    /// Not of the `section.key` shape; no section is guessed.
    Malformed { key: String },
    /// The section name holds something other than a mapping.
    SectionConflict { key: String, section: String },
}

impl UpdateOutcome {
    pub fn key(&self) -> &str {
        match self {
            UpdateOutcome::Inserted { key, .. }
            | UpdateOutcome::AlreadyPresent { key }
            | UpdateOutcome::Malformed { key }
            | UpdateOutcome::SectionConflict { key, .. } => key,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateReport {
    pub outcomes: Vec<UpdateOutcome>,
}

impl UpdateReport {
    pub fn inserted_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, UpdateOutcome::Inserted { .. }))
            .count()
    }

    pub fn count_source(&self, wanted: ValueSource) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, UpdateOutcome::Inserted { source, .. } if *source == wanted))
            .count()
    }

    pub fn present_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, UpdateOutcome::AlreadyPresent { .. }))
            .count()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| {
                matches!(
                    o,
                    UpdateOutcome::Malformed { .. } | UpdateOutcome::SectionConflict { .. }
                )
            })
            .count()
    }

    /// True when the dictionary differs from its state before the update.
    pub fn changed(&self) -> bool {
        self.inserted_count() > 0
    }
}

/// Value for a new short key: curated table first, generated label otherwise.
pub fn choose_value(short_key: &str) -> (String, ValueSource) {
    match curated_translation(short_key) {
        Some(value) => (value.to_string(), ValueSource::Curated),
        None => (humanize_key(short_key), ValueSource::Generated),
    }
}

/// Insert each key at most once, never overwriting an existing entry.
pub fn insert_missing<'a>(
    dictionary: &mut Dictionary,
    keys: impl IntoIterator<Item = &'a str>,
) -> UpdateReport {
    let mut report = UpdateReport::default();

    for raw in keys {
        let Some(dotted) = DottedKey::parse(raw) else {
            tracing::warn!(key = raw, "skipping malformed key");
            report.outcomes.push(UpdateOutcome::Malformed {
                key: raw.to_string(),
            });
            continue;
        };

        if dictionary.contains(&dotted) {
            tracing::debug!(key = raw, "already present");
            report.outcomes.push(UpdateOutcome::AlreadyPresent {
                key: raw.to_string(),
            });
            continue;
        }

        let section = match dictionary.section_mut(dotted.section) {
            Ok(section) => section,
            Err(conflict) => {
                tracing::warn!(key = raw, section = %conflict.section, "section is not a mapping");
                report.outcomes.push(UpdateOutcome::SectionConflict {
                    key: raw.to_string(),
                    section: conflict.section,
                });
                continue;
            }
        };

        let (value, source) = choose_value(dotted.key);
        tracing::debug!(key = raw, value = %value, %source, "inserting");
        section.insert(dotted.key.to_string(), Value::String(value.clone()));
        report.outcomes.push(UpdateOutcome::Inserted {
            key: raw.to_string(),
            value,
            source,
        });
    }

    report
}

/// Write the dictionary back only if the update changed it.
///
/// Returns whether a write happened.
pub fn save_if_changed(
    dictionary: &Dictionary,
    report: &UpdateReport,
    path: &Path,
) -> anyhow::Result<bool> {
    if !report.changed() {
        return Ok(false);
    }
    dictionary.save(path)?;
    Ok(true)
}
