//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Testkit CLI - Check driver adapter test environments
#[derive(Parser, Debug)]
#[command(name = "testkit")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "Testkit CLI - Check driver adapter test environments", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the driver adapter test environment
    Check(CheckArgs),

    /// Print the validated environment with defaults applied
    Export(ExportArgs),

    /// Display version information
    Version,
}

/// Where to read environment variables from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Read variables from a dotenv-style file instead of the process environment
    #[arg(long, conflicts_with = "file")]
    pub env_file: Option<PathBuf>,

    /// Read variables from a JSON or TOML fixture
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

// =============================================================================
// Check Command
// =============================================================================

/// Arguments for the `check` command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Report formats for `check`
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Machine-readable JSON on stdout
    Json,
}

// =============================================================================
// Export Command
// =============================================================================

/// Arguments for the `export` command
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Prefix each line with `export` for shell sourcing
    #[arg(long)]
    pub shell: bool,
}
