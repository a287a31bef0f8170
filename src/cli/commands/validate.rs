//! agentskills validate - Check corpus cross-references

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::core::validation::{Finding, validate_corpus};
use crate::error::{Result, SkillsError};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Local corpus root (default: configured root or ./.agents)
    #[arg(long, value_name = "PATH")]
    pub local_root: Option<PathBuf>,
}

#[derive(Serialize)]
struct ValidationReport<'a> {
    root: String,
    passed: bool,
    findings: &'a [Finding],
}

pub fn run(ctx: &AppContext, args: &ValidateArgs) -> Result<()> {
    let root = ctx.local_root(args.local_root.as_deref());
    if !root.is_dir() {
        return Err(SkillsError::NotFound(format!(
            "corpus directory {}",
            root.display()
        )));
    }
    let findings = validate_corpus(&root)?;

    if ctx.robot() {
        emit_json(&robot_ok(ValidationReport {
            root: root.display().to_string(),
            passed: findings.is_empty(),
            findings: &findings,
        }))?;
    } else {
        let mut layout = HumanLayout::new();
        layout.title("Validation");
        layout.kv("Corpus", &root.display().to_string());
        if findings.is_empty() {
            layout.kv("Result", "passed");
        } else {
            layout.kv("Result", &format!("{} finding(s)", findings.len()));
            layout.blank();
            for finding in &findings {
                layout.bullet(&finding.to_string());
            }
        }
        emit_human(layout);
    }

    if findings.is_empty() {
        Ok(())
    } else {
        Err(SkillsError::ValidationFailed(format!(
            "{} broken reference(s) in {}",
            findings.len(),
            root.display()
        )))
    }
}
