//! The analysis report: the one artifact handed to other tooling.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{
    context::ScannedDefinition,
    data::Definition,
    dictionary::Dictionary,
    norms::ComputationInfo,
    xref::{MissingKey, title_translation},
};

/// Translation status of one definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationStatus {
    /// The translated title, `null` when unresolved.
    pub title: Option<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionReport {
    #[serde(flatten)]
    pub definition: Definition,
    pub module: String,
    pub computation: ComputationInfo,
    pub translations: TranslationStatus,
}

impl DefinitionReport {
    pub fn new(
        scanned: &ScannedDefinition,
        dictionary: &Dictionary,
        missing: &[MissingKey],
        computation: ComputationInfo,
    ) -> Self {
        Self {
            definition: scanned.definition.clone(),
            module: scanned.module.clone(),
            computation,
            translations: TranslationStatus {
                title: title_translation(dictionary, &scanned.definition).map(str::to_string),
                missing: missing.iter().map(|m| m.key.clone()).collect(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_definitions: usize,
    pub with_norms: usize,
    /// Definitions whose computation file is absent or cites no norms.
    pub with_unresolved_norms: usize,
    pub with_unresolved_translations: usize,
    /// Sum of missing keys over all definitions.
    pub missing_keys: usize,
    pub dropped_declarations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub total_definitions: usize,
    pub definitions: Vec<DefinitionReport>,
    pub summary: ReportSummary,
}

impl AnalysisReport {
    pub fn new(definitions: Vec<DefinitionReport>, dropped_declarations: usize) -> Self {
        let with_norms = definitions
            .iter()
            .filter(|d| d.computation.has_norms)
            .count();
        let summary = ReportSummary {
            total_definitions: definitions.len(),
            with_norms,
            with_unresolved_norms: definitions.len() - with_norms,
            with_unresolved_translations: definitions
                .iter()
                .filter(|d| !d.translations.missing.is_empty())
                .count(),
            missing_keys: definitions
                .iter()
                .map(|d| d.translations.missing.len())
                .sum(),
            dropped_declarations,
        };

        Self {
            total_definitions: definitions.len(),
            definitions,
            summary,
        }
    }

    /// Pretty JSON with non-ASCII text unescaped and a trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize analysis report")?;
        Ok(format!("{}\n", content))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path, self.to_json_string()?)
            .with_context(|| format!("Failed to write report: {}", path.display()))
    }
}
