use anyhow::Result;

use super::{CommandResult, CommandSummary, GenerateSummary, helper::finish};
use crate::{
    cli::args::GenerateCommand,
    core::{
        context::ProjectContext,
        generate::{Generator, WriteOutcome, write_new},
    },
    issues::{GenerationSkippedIssue, Issue, WriteConflictIssue, WriteFailedIssue},
};

pub fn generate(cmd: GenerateCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let scan = ctx.scan();
    let mut issues = scan.issues();
    let generator = Generator::new(ctx.output_root(), &ctx.config);

    let mut files = Vec::new();
    let mut existing_count = 0;
    let mut skipped_count = 0;

    for scanned in &scan.definitions {
        let id = &scanned.definition.id;
        let file = match generator.render(&scanned.definition, &scanned.module) {
            Ok(file) => file,
            Err(reason) => {
                tracing::debug!(id = %id, "skipping: {}", reason);
                skipped_count += 1;
                issues.push(Issue::GenerationSkipped(GenerationSkippedIssue {
                    context: scanned.context(),
                    definition_id: id.clone(),
                    reason,
                }));
                continue;
            }
        };
        let shown = ctx.display_path(&file.path);

        let outcome = if cmd.dry_run {
            if file.path.exists() {
                WriteOutcome::AlreadyExists
            } else {
                WriteOutcome::Created
            }
        } else {
            match write_new(&file.path, &file.content) {
                Ok(outcome) => outcome,
                Err(err) => {
                    tracing::warn!(id = %id, "{:#}", err);
                    issues.push(Issue::WriteFailed(WriteFailedIssue {
                        path: shown,
                        definition_id: id.clone(),
                        reason: err.root_cause().to_string(),
                    }));
                    continue;
                }
            }
        };

        match outcome {
            WriteOutcome::Created => files.push(shown),
            WriteOutcome::AlreadyExists => {
                existing_count += 1;
                issues.push(Issue::WriteConflict(WriteConflictIssue {
                    path: shown,
                    definition_id: id.clone(),
                }));
            }
        }
    }

    Ok(finish(
        CommandSummary::Generate(GenerateSummary {
            files,
            existing_count,
            skipped_count,
            dry_run: cmd.dry_run,
        }),
        issues,
    ))
}
