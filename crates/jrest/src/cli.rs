//! Clap derive structures for the `jrest` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// jrest -- push JSON configuration to Junos devices over HTTP
#[derive(Debug, Parser)]
#[command(
    name = "jrest",
    version,
    about = "Push JSON configuration to Junos-family devices",
    long_about = "Talks to the Junos XML-over-HTTP management interface using plain\n\
        JSON payloads: the configuration is wrapped in the device's commit\n\
        envelope, pushed, and the verbose XML reply is normalized into a\n\
        flat success/fail/error result.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Path to the device inventory file
    #[arg(long, short = 'i', env = "JREST_INVENTORY", global = true)]
    pub inventory: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "JREST_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a new configuration to a device and commit it
    #[command(alias = "cfg")]
    Configure(ConfigureArgs),

    /// Validate the candidate configuration without committing
    Check(CheckArgs),

    /// List configured devices (secrets excluded)
    #[command(alias = "ls")]
    List,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ConfigureArgs {
    /// Device name from the inventory
    #[arg(long, short = 'd')]
    pub device: String,

    /// Configuration as a JSON string
    #[arg(long, short = 'c', conflicts_with = "file")]
    pub config: Option<String>,

    /// Read the configuration JSON from a file
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Device name from the inventory
    #[arg(long, short = 'd')]
    pub device: String,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
