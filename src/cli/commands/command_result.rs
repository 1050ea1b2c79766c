use std::path::PathBuf;

use crate::{
    cli::exit_status::ExitStatus,
    core::{rewrite::FileRewrite, update::UpdateReport},
    issues::{Issue, Severity},
};

#[derive(Debug)]
pub enum CommandSummary {
    Analyze(AnalyzeSummary),
    Translate(TranslateSummary),
    Generate(GenerateSummary),
    Rewrite(RewriteSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct AnalyzeSummary {
    pub definition_count: usize,
    pub with_norms: usize,
    pub missing_key_count: usize,
    /// Where the report was written; `None` on a dry run.
    pub report_path: Option<String>,
}

#[derive(Debug)]
pub struct TranslateSummary {
    pub update: UpdateReport,
    pub dictionary_path: String,
    pub written: bool,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct GenerateSummary {
    /// Created, or on a dry run, would be created.
    pub files: Vec<String>,
    pub existing_count: usize,
    pub skipped_count: usize,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct RewriteSummary {
    /// Short description of the rule, e.g. `category remap`.
    pub rule: String,
    /// Files the rule changed (or would change).
    pub changed: Vec<(String, FileRewrite)>,
    pub files_checked: usize,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
    /// False when a config file was already there.
    pub created: bool,
}

/// Result of running one command.
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Problems found along the way, sorted before printing.
    pub issues: Vec<Issue>,
}

impl CommandResult {
    pub fn new(summary: CommandSummary, issues: Vec<Issue>) -> Self {
        Self { summary, issues }
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Warning)
            .count()
    }

    /// Whether a dry run left changes that a real run would make.
    pub fn has_pending_changes(&self) -> bool {
        match &self.summary {
            CommandSummary::Translate(s) => s.dry_run && s.update.changed(),
            CommandSummary::Generate(s) => s.dry_run && !s.files.is_empty(),
            CommandSummary::Rewrite(s) => s.dry_run && !s.changed.is_empty(),
            CommandSummary::Analyze(_) | CommandSummary::Init(_) => false,
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        match &self.summary {
            CommandSummary::Init(s) if !s.created => ExitStatus::Failure,
            _ if self.error_count() > 0 || self.has_pending_changes() => ExitStatus::Failure,
            _ => ExitStatus::Success,
        }
    }
}
