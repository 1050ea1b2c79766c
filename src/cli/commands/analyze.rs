use anyhow::Result;

use super::{AnalyzeSummary, CommandResult, CommandSummary, helper::finish};
use crate::{
    cli::args::AnalyzeCommand,
    core::{
        analysis::{AnalysisReport, DefinitionReport},
        context::ProjectContext,
        dictionary::Dictionary,
        norms::{ComputationInfo, computation_path, inspect_computation},
        xref::missing_keys,
    },
    issues::{Issue, MalformedKeyIssue, MissingInputIssue, MissingTranslationIssue},
};

pub fn analyze(cmd: AnalyzeCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let scan = ctx.scan();
    let mut issues = scan.issues();

    let dictionary = match ctx.load_dictionary()? {
        Some(dictionary) => dictionary,
        None => {
            issues.push(ctx.missing_dictionary_issue());
            Dictionary::new()
        }
    };

    let computations_root = ctx.computations_root();
    let extension = ctx.config.dotted_extension();
    let mut definitions = Vec::with_capacity(scan.definitions.len());

    for scanned in &scan.definitions {
        let missing = missing_keys(&dictionary, &scanned.definition);
        for m in &missing {
            let issue = if m.malformed {
                Issue::MalformedKey(MalformedKeyIssue {
                    context: scanned.context(),
                    definition_id: scanned.definition.id.clone(),
                    key: m.key.clone(),
                    role: m.role,
                })
            } else {
                Issue::MissingTranslation(MissingTranslationIssue {
                    context: scanned.context(),
                    definition_id: scanned.definition.id.clone(),
                    key: m.key.clone(),
                    role: m.role,
                })
            };
            issues.push(issue);
        }

        let computation = match &scanned.definition.computation_ref {
            Some(reference) => {
                let path = computation_path(&computations_root, reference, &extension);
                inspect_computation(&path).unwrap_or_else(|err| {
                    tracing::warn!("{:#}", err);
                    issues.push(Issue::MissingInput(MissingInputIssue {
                        path: ctx.display_path(&path),
                        reason: format!("{:#}", err),
                    }));
                    ComputationInfo::missing()
                })
            }
            None => ComputationInfo::missing(),
        };

        definitions.push(DefinitionReport::new(
            scanned,
            &dictionary,
            &missing,
            computation,
        ));
    }

    let report = AnalysisReport::new(definitions, scan.failure_count);

    let report_path = if cmd.dry_run {
        None
    } else {
        let path = match &cmd.output {
            Some(output) => ctx.root.join(output),
            None => ctx.report_path(),
        };
        report.save(&path)?;
        tracing::debug!(path = %path.display(), "analysis report written");
        Some(ctx.display_path(&path))
    };

    Ok(finish(
        CommandSummary::Analyze(AnalyzeSummary {
            definition_count: report.summary.total_definitions,
            with_norms: report.summary.with_norms,
            missing_key_count: report.summary.missing_keys,
            report_path,
        }),
        issues,
    ))
}
