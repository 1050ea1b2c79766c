use std::fs;

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, InitSummary, helper::finish};
use crate::{
    cli::args::InitCommand,
    config::{CONFIG_FILE_NAME, default_config_json},
};

pub fn init(cmd: InitCommand) -> Result<CommandResult> {
    let root = cmd.common.root.unwrap_or_else(|| ".".into());
    let config_path = root.join(CONFIG_FILE_NAME);

    let created = if config_path.exists() {
        false
    } else {
        fs::write(&config_path, default_config_json()?)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        true
    };

    Ok(finish(
        CommandSummary::Init(InitSummary {
            path: config_path,
            created,
        }),
        Vec::new(),
    ))
}
