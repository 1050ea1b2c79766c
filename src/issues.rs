//! Issue types produced by the migration commands.
//!
//! Nothing in a batch run is fatal at the item level: every problem becomes
//! an issue value that is collected, sorted and summarized at the end.
//! Each issue is self-contained with everything the reporter needs.

use enum_dispatch::enum_dispatch;

use crate::core::{
    data::{LabelRole, SourceContext},
    extract::{DeclarationKind, DropReason},
    generate::SkipReason,
};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MissingTranslation,
    MalformedKey,
    DroppedDeclaration,
    MissingInput,
    WriteConflict,
    WriteFailed,
    SectionConflict,
    GenerationSkipped,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MissingTranslation => write!(f, "missing-translation"),
            Rule::MalformedKey => write!(f, "malformed-key"),
            Rule::DroppedDeclaration => write!(f, "dropped-declaration"),
            Rule::MissingInput => write!(f, "missing-input"),
            Rule::WriteConflict => write!(f, "write-conflict"),
            Rule::WriteFailed => write!(f, "write-failed"),
            Rule::SectionConflict => write!(f, "section-conflict"),
            Rule::GenerationSkipped => write!(f, "generation-skipped"),
        }
    }
}

// ============================================================
// Issue Types - Declarations (SourceContext)
// ============================================================

/// A label key referenced by a definition that has no translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTranslationIssue {
    pub context: SourceContext,
    pub definition_id: String,
    pub key: String,
    pub role: LabelRole,
}

impl MissingTranslationIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingTranslation
    }
}

/// A label key that is not of the `section.key` shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedKeyIssue {
    pub context: SourceContext,
    pub definition_id: String,
    pub key: String,
    pub role: LabelRole,
}

impl MalformedKeyIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MalformedKey
    }
}

/// A span that opened like a declaration but yielded no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedDeclarationIssue {
    pub context: SourceContext,
    pub kind: DeclarationKind,
    pub reason: DropReason,
}

impl DroppedDeclarationIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::DroppedDeclaration
    }
}

/// A definition the generator did not emit a file for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSkippedIssue {
    pub context: SourceContext,
    pub definition_id: String,
    pub reason: SkipReason,
}

impl GenerationSkippedIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::GenerationSkipped
    }
}

// ============================================================
// Issue Types - Files
// ============================================================

/// A referenced file or directory that does not exist or cannot be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingInputIssue {
    pub path: String,
    pub reason: String,
}

impl MissingInputIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingInput
    }
}

/// An output file already exists and was left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteConflictIssue {
    pub path: String,
    pub definition_id: String,
}

impl WriteConflictIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::WriteConflict
    }
}

/// An output file that could not be created or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailedIssue {
    pub path: String,
    pub definition_id: String,
    pub reason: String,
}

impl WriteFailedIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::WriteFailed
    }
}

/// A dictionary section name that holds something other than a mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionConflictIssue {
    pub dictionary_path: String,
    pub key: String,
    pub section: String,
}

impl SectionConflictIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::SectionConflict
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingTranslation(MissingTranslationIssue),
    MalformedKey(MalformedKeyIssue),
    DroppedDeclaration(DroppedDeclarationIssue),
    GenerationSkipped(GenerationSkippedIssue),
    MissingInput(MissingInputIssue),
    WriteConflict(WriteConflictIssue),
    WriteFailed(WriteFailedIssue),
    SectionConflict(SectionConflictIssue),
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source location with the line text for caret display.
    Source(&'a SourceContext),
    /// File-level only.
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (key name, path, reason).
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for MissingTranslationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("{} of '{}'", self.role, self.definition_id))
    }

    fn hint(&self) -> Option<&str> {
        Some("run `calcmig translate` to backfill the dictionary")
    }
}

impl Report for MalformedKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "{} of '{}' is not of the form `section.key`",
            self.role, self.definition_id
        ))
    }
}

impl Report for DroppedDeclarationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.reason.to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("{} skipped", self.kind))
    }
}

impl Report for GenerationSkippedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.definition_id.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.reason.to_string())
    }
}

impl Report for MissingInputIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.path }
    }

    fn message(&self) -> String {
        self.path.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.reason.clone())
    }
}

impl Report for WriteConflictIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.path }
    }

    fn message(&self) -> String {
        self.path.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("already exists, '{}' not generated", self.definition_id))
    }
}

impl Report for WriteFailedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.path }
    }

    fn message(&self) -> String {
        self.path.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("'{}' not generated: {}", self.definition_id, self.reason))
    }
}

impl Report for SectionConflictIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.dictionary_path,
        }
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("section '{}' is not an object", self.section))
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }

    fn sort_key(&self) -> (&str, usize, usize) {
        match self.location() {
            ReportLocation::Source(ctx) => (ctx.file_path(), ctx.line(), ctx.col()),
            ReportLocation::File { path } => (path, 0, 0),
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
