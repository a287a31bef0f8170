//! Output formatting: resolved documents to files, per [`OutputMode`].
//!
//! Pure functions. Every path in a [`WriteSet`] is relative to the working
//! root and uses `/` separators.

use std::fmt::Write as _;

use crate::core::{PersonaDocument, SkillDocument, SubDocument};
use crate::profiles::{AssistantProfile, OutputMode};

/// Everything an install needs for one persona.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInstall {
    pub persona: PersonaDocument,
    pub skills: Vec<SkillDocument>,
    /// Empty when the corpus has no global rules.
    pub global_rules: String,
    pub workflows: Vec<SubDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWrite {
    pub path: String,
    pub content: String,
}

/// Files one (persona, assistant) install produces, plus historical paths
/// the cleanup pass may remove.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSet {
    pub writes: Vec<FileWrite>,
    pub legacy: Vec<String>,
}

impl WriteSet {
    fn push(&mut self, path: String, content: impl Into<String>) {
        self.writes.push(FileWrite {
            path,
            content: content.into(),
        });
    }

    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        self.writes.iter().map(|w| w.path.as_str()).collect()
    }
}

/// Produce the write-set for `resolved` under `profile`.
///
/// `compat` controls mirroring workflows into the profile's command dirs.
#[must_use]
pub fn format(resolved: &ResolvedInstall, profile: &AssistantProfile, compat: bool) -> WriteSet {
    let mut set = match profile.mode {
        OutputMode::Monolithic => monolithic(resolved, profile),
        OutputMode::Folder => folder(resolved, profile),
        OutputMode::CursorLike => cursorlike(resolved, profile),
        OutputMode::Flat => flat(resolved, profile),
    };
    if compat && profile.mode != OutputMode::Monolithic {
        mirror_commands(&mut set, resolved, profile);
    }
    set.legacy = legacy_paths(resolved, profile);
    set
}

fn target(profile: &AssistantProfile, relative: &str) -> String {
    format!("{}/{relative}", profile.target_dir)
}

fn monolithic(resolved: &ResolvedInstall, profile: &AssistantProfile) -> WriteSet {
    let persona = &resolved.persona;
    let mut bundle = format!("# Global Ecosystem Rules\n\n{}\n\n", resolved.global_rules);
    let _ = write!(bundle, "# Agent Persona: {}\n\n{}\n\n", persona.id, persona.body);

    for skill in &resolved.skills {
        let _ = write!(
            bundle,
            "## Skill: {}\n\n{}\n\n",
            skill.id,
            skill.content.as_deref().unwrap_or_default()
        );
        for reference in &skill.references {
            let _ = write!(
                bundle,
                "### Reference: {}\n\n{}\n\n",
                reference.name, reference.content
            );
        }
    }
    for workflow in &resolved.workflows {
        let _ = write!(
            bundle,
            "## Workflow: {}\n\n{}\n\n",
            stem(&workflow.name),
            workflow.content
        );
    }

    let mut set = WriteSet::default();
    set.push(
        target(profile, &format!("{}-instructions.md", persona.id)),
        bundle,
    );
    set
}

fn folder(resolved: &ResolvedInstall, profile: &AssistantProfile) -> WriteSet {
    let mut set = WriteSet::default();
    set.push(
        target(profile, &format!("agents/{}.md", resolved.persona.id)),
        resolved.persona.body.clone(),
    );
    set.push(
        target(profile, "skills/global-rules.md"),
        resolved.global_rules.clone(),
    );

    for skill in &resolved.skills {
        let base = format!("skills/{}", skill.id);
        if let Some(content) = &skill.content {
            set.push(target(profile, &format!("{base}/SKILL.md")), content.clone());
        }
        for reference in &skill.references {
            set.push(
                target(profile, &format!("{base}/references/{}", reference.name)),
                reference.content.clone(),
            );
        }
        for script in &skill.scripts {
            set.push(
                target(profile, &format!("{base}/scripts/{}", script.name)),
                script.content.clone(),
            );
        }
    }

    for workflow in &resolved.workflows {
        set.push(
            target(profile, &format!("skills/workflows/{}", workflow.name)),
            workflow.content.clone(),
        );
    }
    set
}

fn cursorlike(resolved: &ResolvedInstall, profile: &AssistantProfile) -> WriteSet {
    let mut set = WriteSet::default();
    if !resolved.global_rules.is_empty() {
        set.push(
            target(profile, &format!("global-rules{}", profile.role_ext)),
            format!(
                "---\ndescription: Global ecosystem rules\nglobs: *\nalwaysApply: true\n---\n\n{}\n",
                resolved.global_rules
            ),
        );
    }

    let header = format!(
        "---\ndescription: Agent Persona - {}\nglobs: *\n---\n\n",
        resolved.persona.id
    );
    set.push(
        target(profile, &format!("{}{}", resolved.persona.id, profile.role_ext)),
        header + &combined(resolved),
    );
    set
}

fn flat(resolved: &ResolvedInstall, profile: &AssistantProfile) -> WriteSet {
    let mut set = WriteSet::default();
    set.push(
        target(profile, &format!("{}{}", resolved.persona.id, profile.role_ext)),
        combined(resolved),
    );
    for workflow in &resolved.workflows {
        set.push(
            target(
                profile,
                &format!("workflows-{}{}", stem(&workflow.name), profile.role_ext),
            ),
            workflow.content.clone(),
        );
    }
    set
}

/// Rules, persona and skills in one document, references fenced off.
fn combined(resolved: &ResolvedInstall) -> String {
    let mut out = format!("# Global Rules\n{}\n\n", resolved.global_rules);
    let _ = write!(out, "# Agent Persona\n{}\n\n", resolved.persona.body);

    for skill in &resolved.skills {
        let _ = writeln!(
            out,
            "## Capability: {}\n{}",
            skill.id,
            skill.content.as_deref().unwrap_or_default()
        );
        for reference in &skill.references {
            let _ = writeln!(
                out,
                "### Reference: {}\n<reference>\n{}\n</reference>",
                reference.name, reference.content
            );
        }
    }
    out
}

fn mirror_commands(set: &mut WriteSet, resolved: &ResolvedInstall, profile: &AssistantProfile) {
    for dir in profile.command_dirs {
        for workflow in &resolved.workflows {
            set.push(format!("{dir}/{}", workflow.name), workflow.content.clone());
        }
    }
}

/// Paths older releases wrote for this mode and the current one no longer does.
#[must_use]
pub fn legacy_paths(resolved: &ResolvedInstall, profile: &AssistantProfile) -> Vec<String> {
    let mut legacy = Vec::new();
    match profile.mode {
        OutputMode::Monolithic => {}
        OutputMode::Folder => {
            legacy.push(target(
                profile,
                &format!("skills/agents/{}.md", resolved.persona.id),
            ));
            for skill in &resolved.skills {
                legacy.push(target(profile, &format!("skills/skills/{}/SKILL.md", skill.id)));
            }
        }
        OutputMode::CursorLike | OutputMode::Flat => {
            for skill in &resolved.skills {
                let flattened = skill.id.replace('/', "_");
                for script in &skill.scripts {
                    legacy.push(format!(".agent_scripts/{flattened}/{}", script.name));
                }
            }
            if profile.mode == OutputMode::Flat {
                for workflow in &resolved.workflows {
                    legacy.push(target(profile, &format!("workflows/{}", workflow.name)));
                }
            }
        }
    }
    legacy
}

fn stem(name: &str) -> &str {
    name.strip_suffix(".md").unwrap_or(name)
}
