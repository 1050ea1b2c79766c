use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, analyze::analyze, generate::generate, init::init,
        migrate::migrate_categories, remove_field::remove_field, translate::translate,
    },
};

/// Dispatch to the command handler.
///
/// Item-level problems come back as issues inside the result; `Err` is
/// reserved for runs that cannot proceed at all (bad config, corrupt
/// dictionary, unwritable output).
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Analyze(cmd)) => analyze(cmd),
        Some(Command::Translate(cmd)) => translate(cmd),
        Some(Command::Generate(cmd)) => generate(cmd),
        Some(Command::MigrateCategories(cmd)) => migrate_categories(cmd),
        Some(Command::RemoveField(cmd)) => remove_field(cmd),
        Some(Command::Init(cmd)) => init(cmd),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
