//! Command-line surface.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

pub use commands::Commands;
pub use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "agentskills",
    version,
    about = "Install agent personas and skills into AI coding assistant layouts"
)]
pub struct Cli {
    /// Machine-readable JSON on stdout, JSON logs on stderr
    #[arg(long, global = true)]
    pub robot: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file replacing the user and project configs
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Working root that generated files are written under
    #[arg(long, global = true, value_name = "PATH", env = "AGENTSKILLS_ROOT")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    #[must_use]
    pub const fn output_format(&self) -> OutputFormat {
        if self.robot {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}
