//! agentskills list - Show what can be installed

use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::debug;

use super::SourceArgs;
use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::core::{self, DomainResolver, DomainTable};
use crate::error::Result;
use crate::profiles::{Assistant, OutputMode};
use crate::source::{self, ContentSource};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// What to list (default: everything)
    #[arg(value_enum)]
    pub what: Option<ListTarget>,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTarget {
    Personas,
    Domains,
    Assistants,
}

#[derive(Serialize, Default)]
struct ListReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    personas: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    domains: Option<DomainTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assistants: Option<Vec<AssistantRow>>,
}

#[derive(Serialize)]
struct AssistantRow {
    name: &'static str,
    mode: OutputMode,
    target_dir: &'static str,
    extension: &'static str,
    command_dirs: &'static [&'static str],
    default: bool,
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let wants = |target: ListTarget| args.what.is_none_or(|what| what == target);
    let mut report = ListReport::default();

    if wants(ListTarget::Assistants) {
        report.assistants = Some(assistant_rows());
    }
    if wants(ListTarget::Personas) || wants(ListTarget::Domains) {
        let config = ctx.source_config(&args.source)?;
        debug!(source = %config.describe(), "listing corpus");
        let source = source::open(&config)?;
        if wants(ListTarget::Personas) {
            report.personas = Some(core::list_personas(source.as_ref()));
        }
        if wants(ListTarget::Domains) {
            report.domains = Some(domain_table(ctx, source.as_ref()));
        }
    }

    if ctx.robot() {
        return emit_json(&robot_ok(report));
    }

    let mut layout = HumanLayout::new();
    if let Some(personas) = &report.personas {
        layout.section("Personas");
        if personas.is_empty() {
            layout.warning("no personas found");
        }
        for persona in personas {
            layout.bullet(persona);
        }
        layout.blank();
    }
    if let Some(domains) = &report.domains {
        layout.section("Domains");
        for (domain, personas) in domains {
            layout.kv(domain, &personas.join(", "));
        }
        layout.blank();
    }
    if let Some(assistants) = &report.assistants {
        layout.section("Assistants");
        for row in assistants {
            let marker = if row.default { " (all)" } else { "" };
            layout.kv(row.name, &format!("{} -> {}{marker}", row.mode, row.target_dir));
        }
    }
    emit_human(layout);
    Ok(())
}

fn assistant_rows() -> Vec<AssistantRow> {
    Assistant::all()
        .iter()
        .map(|assistant| {
            let profile = assistant.profile();
            AssistantRow {
                name: assistant.name(),
                mode: profile.mode,
                target_dir: profile.target_dir,
                extension: profile.role_ext,
                command_dirs: profile.command_dirs,
                default: profile.include_in_all,
            }
        })
        .collect()
}

fn domain_table(ctx: &AppContext, source: &dyn ContentSource) -> DomainTable {
    DomainResolver::standard(&ctx.workspace_domains_path(), source).table()
}
