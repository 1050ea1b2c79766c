//! Report formatting and printing.
//!
//! Issues are shown in cargo-style format, followed by a short
//! per-command summary. Kept out of `core` so the library never prints.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    AnalyzeSummary, CommandResult, CommandSummary, GenerateSummary, InitSummary, RewriteSummary,
    TranslateSummary,
};
use crate::{
    core::update::{UpdateOutcome, ValueSource},
    issues::{Issue, Report, ReportLocation, Severity},
    utils::plural,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print a command result to stdout.
pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, verbose, &mut io::stdout().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    report_to(&result.issues, writer);

    match &result.summary {
        CommandSummary::Analyze(summary) => print_analyze(summary, writer),
        CommandSummary::Translate(summary) => print_translate(summary, verbose, writer),
        CommandSummary::Generate(summary) => print_generate(summary, verbose, writer),
        CommandSummary::Rewrite(summary) => print_rewrite(summary, verbose, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

/// Print issues in cargo-style format. Issues are expected to be sorted.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let max_line_width = calculate_max_line_width(issues);
    for issue in issues {
        print_issue(issue, writer, max_line_width);
    }
    print_summary(issues, writer);
}

// ============================================================
// Issues
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Source(ctx) => {
            let line = ctx.line();
            let col = ctx.col();
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                ctx.file_path(),
                line,
                col
            );

            let caret_char = match severity {
                Severity::Error => "^".red(),
                Severity::Warning => "^".yellow(),
            };
            let _ = writeln!(
                writer,
                "{:>width$} {}",
                "",
                "|".blue(),
                width = max_line_width
            );
            let _ = writeln!(
                writer,
                "{:>width$} {} {}",
                line.to_string().blue(),
                "|".blue(),
                ctx.source_line,
                width = max_line_width
            );

            // col is 1-based
            let prefix: String = ctx.source_line.chars().take(col.saturating_sub(1)).collect();
            let caret_padding = UnicodeWidthStr::width(prefix.as_str());
            let _ = writeln!(
                writer,
                "{:>width$} {} {:>padding$}{}",
                "",
                "|".blue(),
                "",
                caret_char,
                width = max_line_width,
                padding = caret_padding
            );
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        plural(total_errors, "error", "errors").red(),
        total_warnings,
        plural(total_warnings, "warning", "warnings").yellow()
    );
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Command Summaries
// ============================================================

/// `1 file`, `2 files`.
fn counted(count: usize, word: &str) -> String {
    let plural_form = format!("{}s", word);
    format!("{} {}", count, plural(count, word, &plural_form))
}

fn print_analyze<W: Write>(summary: &AnalyzeSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Analyzed {} ({} with norms, {})",
            counted(summary.definition_count, "definition"),
            summary.with_norms,
            counted(summary.missing_key_count, "missing key")
        )
        .green()
    );

    match &summary.report_path {
        Some(path) => {
            let _ = writeln!(writer, "{} {}", "Wrote".green().bold(), path);
        }
        None => {
            let _ = writeln!(writer, "{} analysis report", "Would write".yellow().bold());
        }
    }
}

fn print_translate<W: Write>(summary: &TranslateSummary, verbose: bool, writer: &mut W) {
    let update = &summary.update;
    let inserted = update.inserted_count();

    if inserted == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("No keys to insert into {}", summary.dictionary_path).green()
        );
        return;
    }

    if verbose || summary.dry_run {
        for outcome in &update.outcomes {
            if let UpdateOutcome::Inserted { key, value, source } = outcome {
                let _ = writeln!(
                    writer,
                    "  {} {} = \"{}\" {}",
                    "+".green(),
                    key,
                    value,
                    format!("({})", source).dimmed()
                );
            }
        }
    }

    let verb = if summary.dry_run {
        "Would insert".yellow().bold()
    } else {
        "Inserted".green().bold()
    };
    let _ = writeln!(
        writer,
        "{} {} into {}",
        verb,
        counted(inserted, "key"),
        summary.dictionary_path
    );
    let _ = writeln!(
        writer,
        "  - curated: {}",
        update.count_source(ValueSource::Curated)
    );
    let _ = writeln!(
        writer,
        "  - generated: {}",
        update.count_source(ValueSource::Generated)
    );
    if update.present_count() > 0 {
        let _ = writeln!(writer, "  - already present: {}", update.present_count());
    }
    if update.rejected_count() > 0 {
        let _ = writeln!(writer, "  - rejected: {}", update.rejected_count());
    }
}

fn print_generate<W: Write>(summary: &GenerateSummary, verbose: bool, writer: &mut W) {
    if summary.files.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "No new files to generate".green()
        );
    } else {
        if verbose || summary.dry_run {
            for file in &summary.files {
                let _ = writeln!(writer, "  {} {}", "+".green(), file);
            }
        }
        let verb = if summary.dry_run {
            "Would create".yellow().bold()
        } else {
            "Created".green().bold()
        };
        let _ = writeln!(writer, "{} {}", verb, counted(summary.files.len(), "file"));
    }

    if summary.existing_count > 0 {
        let _ = writeln!(writer, "  - already exist: {}", summary.existing_count);
    }
    if summary.skipped_count > 0 {
        let _ = writeln!(writer, "  - skipped: {}", summary.skipped_count);
    }
}

fn print_rewrite<W: Write>(summary: &RewriteSummary, verbose: bool, writer: &mut W) {
    if summary.changed.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} - nothing to change for {}",
                counted(summary.files_checked, "file"),
                summary.rule
            )
            .green()
        );
        return;
    }

    let mut change_count = 0;
    for (path, rewrite) in &summary.changed {
        change_count += rewrite.changes.len();
        let _ = writeln!(
            writer,
            "  {} {} ({})",
            "~".yellow(),
            path,
            counted(rewrite.changes.len(), "change")
        );
        if verbose || summary.dry_run {
            for change in &rewrite.changes {
                let _ = writeln!(writer, "      {}", change);
            }
        }
    }

    let verb = if summary.dry_run {
        "Would rewrite".yellow().bold()
    } else {
        "Rewrote".green().bold()
    };
    let _ = writeln!(
        writer,
        "{} {} ({}, {})",
        verb,
        counted(summary.changed.len(), "file"),
        counted(change_count, "change"),
        summary.rule
    );
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", summary.path.display()).green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} already exists",
            FAILURE_MARK.red(),
            summary.path.display()
        );
    }
}

// ============================================================
// Tests
// ============================================================
