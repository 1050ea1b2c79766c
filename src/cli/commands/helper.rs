use std::path::PathBuf;

use anyhow::Result;

use super::{CommandResult, CommandSummary, RewriteSummary};
use crate::{
    core::{
        context::ProjectContext,
        rewrite::{RewriteRule, rewrite_file},
    },
    issues::{Issue, MissingInputIssue},
};

/// Sort the issues and wrap up a command's result.
pub fn finish(summary: CommandSummary, mut issues: Vec<Issue>) -> CommandResult {
    issues.sort();
    CommandResult::new(summary, issues)
}

/// Apply `rule` to every file, one at a time. Missing or unreadable files
/// are reported and skipped; the rest of the batch continues.
pub fn rewrite_files(
    ctx: &ProjectContext,
    files: &[PathBuf],
    rule: &RewriteRule,
    rule_name: &str,
    dry_run: bool,
) -> Result<CommandResult> {
    let mut issues = Vec::new();
    let mut changed = Vec::new();
    let mut files_checked = 0;

    for path in files {
        let shown = ctx.display_path(path);
        if !path.is_file() {
            tracing::warn!(path = %shown, "file not found");
            issues.push(Issue::MissingInput(MissingInputIssue {
                path: shown,
                reason: "file does not exist".to_string(),
            }));
            continue;
        }

        files_checked += 1;
        match rewrite_file(path, rule, dry_run) {
            Ok(result) if result.is_changed() => changed.push((shown, result)),
            Ok(_) => {}
            Err(err) => {
                tracing::warn!("{:#}", err);
                issues.push(Issue::MissingInput(MissingInputIssue {
                    path: shown,
                    reason: format!("{:#}", err),
                }));
            }
        }
    }

    Ok(finish(
        CommandSummary::Rewrite(RewriteSummary {
            rule: rule_name.to_string(),
            changed,
            files_checked,
            dry_run,
        }),
        issues,
    ))
}
