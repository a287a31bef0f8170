//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use std::path::PathBuf;

use clap::{Args, Subcommand};

pub mod install;
pub mod list;
pub mod validate;

use crate::app::AppContext;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::List(args) => list::run(ctx, args),
        Commands::Install(args) => install::run(ctx, args),
        Commands::Validate(args) => validate::run(ctx, args),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List personas, domains and supported assistants
    List(list::ListArgs),

    /// Install a persona or domain bundle for one or more assistants
    #[command(visible_alias = "init")]
    Install(install::InstallArgs),

    /// Check cross-references in a local corpus
    Validate(validate::ValidateArgs),
}

/// Content source selection shared by commands that read the corpus.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Read the corpus from the local filesystem instead of the remote repo
    #[arg(long)]
    pub local: bool,

    /// Local corpus root (implies --local)
    #[arg(long, value_name = "PATH")]
    pub local_root: Option<PathBuf>,

    /// Remote repository: owner/repo, GitHub URL or SSH spec
    #[arg(long, value_name = "REPO", conflicts_with_all = ["local", "local_root"])]
    pub repo: Option<String>,

    /// Remote branch
    #[arg(long, value_name = "BRANCH", conflicts_with_all = ["local", "local_root"])]
    pub branch: Option<String>,
}
