//! Install orchestration.
//!
//! For each assistant, personas are resolved and formatted one at a time and
//! fed to a single [`Reconciler`]. Assistants run sequentially so the
//! manifest read-modify-write never races.

pub mod format;
pub mod manifest;
pub mod reconcile;

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

pub use format::{FileWrite, ResolvedInstall, WriteSet};
pub use manifest::{InstallManifest, manifest_path};
pub use reconcile::{ReconcileOptions, ReconcileReport, Reconciler};

use crate::core::{self, PersonaDocument, SkillResolver};
use crate::error::{Result, SkillsError};
use crate::profiles::Assistant;
use crate::source::ContentSource;

/// One invocation's worth of work.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    pub personas: Vec<String>,
    pub assistants: Vec<Assistant>,
    pub options: ReconcileOptions,
}

/// A (persona, assistant) pair that did not install.
#[derive(Debug, Clone, Serialize)]
pub struct InstallFailure {
    pub persona: String,
    pub assistant: Assistant,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssistantReport {
    pub assistant: Assistant,
    pub installed: Vec<String>,
    /// `None` when a failure kept the reconciliation from committing.
    pub reconcile: Option<ReconcileReport>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InstallOutcome {
    pub attempted: usize,
    pub reports: Vec<AssistantReport>,
    pub failures: Vec<InstallFailure>,
}

impl InstallOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Collapse into an error when any pair failed.
    pub fn into_result(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(SkillsError::Partial {
                attempted: self.attempted,
                failed: self.failures.len(),
            })
        }
    }
}

pub struct Installer<'a> {
    root: &'a Path,
    source: &'a dyn ContentSource,
}

impl<'a> Installer<'a> {
    #[must_use]
    pub fn new(root: &'a Path, source: &'a dyn ContentSource) -> Self {
        Self { root, source }
    }

    /// Fetch the persona, its skills, the global rules and all workflows.
    pub fn resolve(&self, persona: &str) -> Result<ResolvedInstall> {
        let persona = PersonaDocument::fetch(self.source, persona)?;
        let skills = SkillResolver::new(self.source).resolve_all(&persona.skills)?;
        let global_rules = core::fetch_global_rules(self.source)?;
        let workflows = core::fetch_workflows(self.source)?;
        Ok(ResolvedInstall {
            persona,
            skills,
            global_rules,
            workflows,
        })
    }

    /// Install every requested persona for every requested assistant.
    ///
    /// Identifier problems abort before anything is fetched. After that,
    /// each pair is attempted independently and failures are collected.
    pub fn run(&self, request: &InstallRequest) -> Result<InstallOutcome> {
        if request.personas.is_empty() {
            return Err(SkillsError::Config("no personas to install".to_string()));
        }
        for persona in &request.personas {
            core::check_identifier("persona", persona)?;
        }

        let mut outcome = InstallOutcome::default();
        for &assistant in &request.assistants {
            let report = self.run_assistant(assistant, request, &mut outcome);
            outcome.reports.push(report);
        }
        Ok(outcome)
    }

    fn run_assistant(
        &self,
        assistant: Assistant,
        request: &InstallRequest,
        outcome: &mut InstallOutcome,
    ) -> AssistantReport {
        let profile = assistant.profile();
        let mut reconciler = Reconciler::new(self.root, assistant, request.options);
        let mut installed = Vec::new();
        let mut failed = false;

        for persona in &request.personas {
            outcome.attempted += 1;
            let set = match self.resolve(persona) {
                Ok(resolved) => format::format(&resolved, &profile, request.options.compat),
                Err(err) => {
                    warn!(persona = %persona, assistant = %assistant, error = %err, "install failed");
                    outcome.failures.push(failure(persona, assistant, &err));
                    failed = true;
                    continue;
                }
            };
            if let Err(err) = reconciler.apply(&set) {
                // Disk state is now unknown; stop this assistant here.
                warn!(persona = %persona, assistant = %assistant, error = %err, "write failed");
                outcome.failures.push(failure(persona, assistant, &err));
                failed = true;
                break;
            }
            info!(persona = %persona, assistant = %assistant, "installed");
            installed.push(persona.clone());
        }

        let reconcile = if failed {
            warn!(assistant = %assistant, "skipping cleanup and manifest update after failures");
            None
        } else {
            match reconciler.commit() {
                Ok(report) => Some(report),
                Err(err) => {
                    warn!(assistant = %assistant, error = %err, "reconciliation failed");
                    outcome.failures.push(failure("", assistant, &err));
                    None
                }
            }
        };

        AssistantReport {
            assistant,
            installed,
            reconcile,
        }
    }
}

fn failure(persona: &str, assistant: Assistant, err: &SkillsError) -> InstallFailure {
    InstallFailure {
        persona: persona.to_string(),
        assistant,
        kind: err.code(),
        message: err.to_string(),
    }
}
