//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all
//! i18n-report commands. It uses clap's derive API for declarative argument
//! parsing.
//!
//! ## Commands
//!
//! - `unused`: Reference keys not used in source code
//! - `missing`: Reference keys absent from a locale
//! - `stale`: Locale keys absent from the reference catalog
//! - `translate`: Used keys missing from a locale, with reference values
//! - `merge`: Merge flat translations into a locale file
//! - `remove`: Remove keys from every locale file
//! - `references`: Where each reference key is used
//! - `dynamic`: Dynamic key patterns and the keys they match
//! - `check`: Lint check over unused, stale and untranslated keys
//! - `init`: Write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// The command to run, or `None` after printing help when none was given.
    pub fn into_command_or_help(self) -> Option<Command> {
        if self.command.is_none() {
            Self::command().print_help().ok();
        }
        self.command
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        self.command
            .as_ref()
            .is_some_and(|command| command.common().verbose)
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Directory to start the repository root search from (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Translations directory, relative to the repository root (overrides config file)
    #[arg(long)]
    pub translations_dir: Option<String>,

    /// Reference locale code (overrides config file)
    #[arg(long)]
    pub reference_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct UnusedCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct LocaleReportCommand {
    /// Target locale code
    #[arg(long)]
    pub locale: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    /// Target locale code
    #[arg(long)]
    pub locale: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Batch number (1-based); requires --batches
    #[arg(long, default_value_t = 0)]
    pub batch: usize,

    /// Total number of batches (0 disables batching)
    #[arg(long, default_value_t = 0)]
    pub batches: usize,

    /// Include the comments attached to each reference entry
    #[arg(long)]
    pub comments: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct MergeCommand {
    /// Target locale code
    #[arg(long)]
    pub locale: String,

    /// Files holding translated text (default: read standard input)
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct RemoveCommand {
    /// Remove every key absent from the reference catalog instead of reading
    /// keys from standard input
    #[arg(long)]
    pub stale: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct FormatCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Target locale code
    #[arg(long)]
    pub locale: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Keys in the reference catalog not referenced in source code
    Unused(UnusedCommand),
    /// Keys in the reference catalog absent from a target locale
    Missing(LocaleReportCommand),
    /// Keys in a locale file absent from the reference catalog
    Stale(LocaleReportCommand),
    /// Used keys missing from a locale, with reference values
    Translate(TranslateCommand),
    /// Read flat translations and write them into a nested locale file
    Merge(MergeCommand),
    /// Remove keys from translation files (standard input or --stale)
    Remove(RemoveCommand),
    /// Where each reference key is used (file:line)
    References(FormatCommand),
    /// Dynamic key patterns found in source and the keys they match
    Dynamic(FormatCommand),
    /// Lint check: unused + stale + missing translations
    Check(CheckCommand),
    /// Initialize a new .i18n-report.json configuration file
    Init(InitCommand),
}

impl Command {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Command::Unused(cmd) => &cmd.common,
            Command::Missing(cmd) | Command::Stale(cmd) => &cmd.common,
            Command::Translate(cmd) => &cmd.common,
            Command::Merge(cmd) => &cmd.common,
            Command::Remove(cmd) => &cmd.common,
            Command::References(cmd) | Command::Dynamic(cmd) => &cmd.common,
            Command::Check(cmd) => &cmd.common,
            Command::Init(cmd) => &cmd.common,
        }
    }
}
