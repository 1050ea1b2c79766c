use anyhow::Result;

use super::{CommandResult, helper::rewrite_files};
use crate::{
    cli::args::RemoveFieldCommand,
    core::{context::ProjectContext, file_scanner::scan_files, rewrite::RewriteRule},
};

pub fn remove_field(cmd: RemoveFieldCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let rule = RewriteRule::delete_field(&ctx.config.field_constructor, &cmd.key)?;

    let files = if cmd.files.is_empty() {
        scan_files(
            &ctx.root,
            &ctx.config.rewrite_includes,
            &ctx.config.rewrite_ignores,
        )
        .files
    } else {
        cmd.files.iter().map(|f| ctx.root.join(f)).collect()
    };

    let rule_name = format!("removal of field '{}'", cmd.key);
    rewrite_files(&ctx, &files, &rule, &rule_name, cmd.dry_run)
}
