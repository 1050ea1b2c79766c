use anyhow::Result;

use super::{CommandResult, helper::rewrite_files};
use crate::{
    cli::args::MigrateCategoriesCommand,
    core::{context::ProjectContext, file_scanner::scan_files, rewrite::RewriteRule},
};

pub fn migrate_categories(cmd: MigrateCategoriesCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let rule = RewriteRule::category_remap(&ctx.config.category_namespace)?;

    let scan = scan_files(
        &ctx.root,
        &ctx.config.rewrite_includes,
        &ctx.config.rewrite_ignores,
    );
    tracing::debug!(files = scan.files.len(), skipped = scan.skipped_count, "rewrite set resolved");

    rewrite_files(&ctx, &scan.files, &rule, "category remap", cmd.dry_run)
}
