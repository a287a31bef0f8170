//! agentskills - persona and skill installer for AI coding assistants.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use agentskills::app::AppContext;
use agentskills::cli::Cli;
use agentskills::cli::output::{emit_json, robot_error};
use agentskills::{Result, SkillsError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Batch and validation outcomes already printed their own report.
            let reported = matches!(
                e,
                SkillsError::Partial { .. } | SkillsError::ValidationFailed(_)
            );
            if cli.robot {
                if !reported {
                    let _ = emit_json(&robot_error(e.code(), e.to_string()));
                }
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::from_cli(cli)?;
    agentskills::cli::commands::run(&ctx, &cli.command)
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,agentskills=info",
        1 => "info,agentskills=debug",
        2 => "debug,agentskills=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.robot {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
