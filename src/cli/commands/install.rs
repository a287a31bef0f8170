//! agentskills install - Install personas into assistant layouts

use clap::{ArgGroup, Args};
use tracing::info;

use super::SourceArgs;
use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok, robot_partial};
use crate::core::DomainResolver;
use crate::error::{Result, SkillsError};
use crate::install::{InstallOutcome, InstallRequest, Installer, ReconcileOptions};
use crate::profiles::{ALL, Assistant};
use crate::source;

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("selection").required(true).args(["persona", "domain"])))]
pub struct InstallArgs {
    /// Persona to install (file stem under agents/)
    #[arg(long, value_name = "ID")]
    pub persona: Option<String>,

    /// Domain bundle to install
    #[arg(long, value_name = "ID")]
    pub domain: Option<String>,

    /// Target assistant, or "all" for the default set
    #[arg(long, value_name = "NAME", default_value = ALL)]
    pub ai: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Do not mirror workflows into assistant command directories
    #[arg(long)]
    pub no_compat: bool,

    /// Keep stale and legacy files
    #[arg(long)]
    pub no_cleanup: bool,

    /// Report what would change without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(ctx: &AppContext, args: &InstallArgs) -> Result<()> {
    let assistants = Assistant::resolve(&args.ai)?;
    let config = ctx.source_config(&args.source)?;
    info!(source = %config.describe(), ai = %args.ai, "starting install");
    let source = source::open(&config)?;

    let personas = match (&args.persona, &args.domain) {
        (Some(persona), _) => vec![persona.clone()],
        (None, Some(domain)) => {
            DomainResolver::standard(&ctx.workspace_domains_path(), source.as_ref())
                .resolve(domain)?
        }
        (None, None) => {
            return Err(SkillsError::Config(
                "one of --persona or --domain is required".to_string(),
            ));
        }
    };

    let request = InstallRequest {
        personas,
        assistants,
        options: ReconcileOptions {
            dry_run: args.dry_run,
            cleanup: ctx.config.install.cleanup && !args.no_cleanup,
            compat: ctx.config.install.compat && !args.no_compat,
        },
    };

    let outcome = Installer::new(&ctx.root, source.as_ref()).run(&request)?;

    if ctx.robot() {
        let completed = outcome.attempted - outcome.failures.len();
        if outcome.is_success() {
            emit_json(&robot_ok(&outcome))?;
        } else {
            emit_json(&robot_partial(completed, outcome.failures.len(), &outcome))?;
        }
    } else {
        emit_human(human_report(&outcome));
    }

    outcome.into_result().map(|_| ())
}

fn human_report(outcome: &InstallOutcome) -> HumanLayout {
    let mut layout = HumanLayout::new();
    layout.title("Install");

    for report in &outcome.reports {
        layout.section(report.assistant.name());
        layout.kv("Personas", &report.installed.join(", "));
        match &report.reconcile {
            Some(reconcile) => {
                layout.kv(
                    "Generated",
                    &format!(
                        "{} file(s), {} unchanged",
                        reconcile.generated.len(),
                        reconcile.unchanged
                    ),
                );
                layout.kv("Removed", &reconcile.removed.len().to_string());
                for removed in &reconcile.removed {
                    layout.bullet(removed);
                }
                if reconcile.dry_run {
                    layout.warning("dry run: nothing was written");
                }
            }
            None => {
                layout.warning("not committed: cleanup and manifest update skipped");
            }
        }
        layout.blank();
    }

    if !outcome.failures.is_empty() {
        layout.section("Failures");
        for failure in &outcome.failures {
            let persona = if failure.persona.is_empty() {
                "-"
            } else {
                failure.persona.as_str()
            };
            layout.bullet(&format!("{persona} @ {}: {}", failure.assistant, failure.message));
        }
    }
    layout
}
