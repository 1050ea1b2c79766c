use anyhow::Result;

use super::{CommandResult, CommandSummary, TranslateSummary, helper::finish};
use crate::{
    cli::args::TranslateCommand,
    core::{
        context::ProjectContext,
        update::{UpdateOutcome, UpdateReport, insert_missing, save_if_changed},
        xref::{aggregate_missing, missing_keys},
    },
    issues::{Issue, SectionConflictIssue},
};

pub fn translate(cmd: TranslateCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let scan = ctx.scan();
    let mut issues = scan.issues();
    let dictionary_path = ctx.dictionary_path();
    let shown = ctx.display_path(&dictionary_path);

    let Some(mut dictionary) = ctx.load_dictionary()? else {
        issues.push(ctx.missing_dictionary_issue());
        return Ok(finish(
            CommandSummary::Translate(TranslateSummary {
                update: UpdateReport::default(),
                dictionary_path: shown,
                written: false,
                dry_run: cmd.dry_run,
            }),
            issues,
        ));
    };

    let missing: Vec<_> = scan
        .definitions
        .iter()
        .flat_map(|scanned| missing_keys(&dictionary, &scanned.definition))
        .collect();
    let keys = aggregate_missing(&missing);
    tracing::debug!(count = keys.len(), "missing keys collected");

    let update = insert_missing(&mut dictionary, keys.iter().map(String::as_str));

    for outcome in &update.outcomes {
        if let UpdateOutcome::SectionConflict { key, section } = outcome {
            issues.push(Issue::SectionConflict(SectionConflictIssue {
                dictionary_path: shown.clone(),
                key: key.clone(),
                section: section.clone(),
            }));
        }
    }

    let written = if cmd.dry_run {
        false
    } else {
        save_if_changed(&dictionary, &update, &dictionary_path)?
    };

    Ok(finish(
        CommandSummary::Translate(TranslateSummary {
            update,
            dictionary_path: shown,
            written,
            dry_run: cmd.dry_run,
        }),
        issues,
    ))
}
