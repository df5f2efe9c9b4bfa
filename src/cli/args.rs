//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `localize`: wrap literal template text in `__('...')` and fill the
//!   language stores with translations of the new keys
//! - `init`: write a default `.bladelocrc.json`

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

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Localize(cmd)) => cmd.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct LocalizeCommand {
    /// Blade templates or directories to scan
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Confirm every change, review translations and resolve conflicts
    #[arg(short, long)]
    pub interactive: bool,

    /// Add new keys to the language files without translating them
    #[arg(short = 't', long)]
    pub no_translate: bool,

    /// Skip semantic validation of extracted texts
    #[arg(short = 'v', long)]
    pub no_validate: bool,

    /// Print every span found and every file scanned
    #[arg(long)]
    pub verbose: bool,

    /// Config file to use instead of searching for .bladelocrc.json
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fetch base configuration from the translation service
    #[arg(long)]
    pub remote_config: bool,

    /// Source language (overrides config and project detection)
    #[arg(long)]
    pub source_language: Option<String>,

    /// Target language, repeatable (overrides config and project detection)
    #[arg(long = "target-language")]
    pub target_languages: Vec<String>,

    /// Bearer token for the completion backend
    #[arg(long, env = "BLADELOC_AI_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Wrap translatable template text and update the language files
    Localize(LocalizeCommand),
    /// Initialize a new .bladelocrc.json configuration file
    Init,
}
