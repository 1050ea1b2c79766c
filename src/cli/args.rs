//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `analyze`: extract definitions, report missing translations and norms
//! - `translate`: backfill missing keys into the dictionary
//! - `generate`: emit new calculator files from extracted definitions
//! - `migrate-categories`: rename old category names in place
//! - `remove-field`: delete a field block by key in place
//! - `init`: write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        self.command
            .as_ref()
            .and_then(Command::common)
            .is_some_and(|common| common.verbose)
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root; the config file is searched from here upward
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Dictionary file, relative to the root (overrides config file)
    #[arg(long)]
    pub dictionary: Option<PathBuf>,

    /// Declaration modules directory, relative to the root (overrides config file)
    #[arg(long)]
    pub modules_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct AnalyzeCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Report only; do not write the analysis file
    #[arg(long)]
    pub dry_run: bool,

    /// Analysis report path (overrides config file)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Show what would be inserted without writing the dictionary
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Show which files would be created without writing them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct MigrateCategoriesCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Show the substitutions without rewriting files
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct RemoveFieldCommand {
    /// Key of the field blocks to remove
    pub key: String,

    /// File to rewrite instead of the configured set (repeatable)
    #[arg(long = "file")]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Show the removals without rewriting files
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract definitions and report missing translations and norm references
    Analyze(AnalyzeCommand),
    /// Insert missing label keys into the dictionary
    Translate(TranslateCommand),
    /// Generate new calculator files from the extracted definitions
    Generate(GenerateCommand),
    /// Rename old category names in generated files
    MigrateCategories(MigrateCategoriesCommand),
    /// Remove field blocks with the given key from generated files
    RemoveField(RemoveFieldCommand),
    /// Initialize a new .calcmigrc.json configuration file
    Init(InitCommand),
}

impl Command {
    pub fn common(&self) -> Option<&CommonArgs> {
        match self {
            Command::Analyze(cmd) => Some(&cmd.common),
            Command::Translate(cmd) => Some(&cmd.common),
            Command::Generate(cmd) => Some(&cmd.common),
            Command::MigrateCategories(cmd) => Some(&cmd.common),
            Command::RemoveField(cmd) => Some(&cmd.common),
            Command::Init(cmd) => Some(&cmd.common),
        }
    }
}
