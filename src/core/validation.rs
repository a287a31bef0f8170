//! Static cross-reference checks over a local corpus.
//!
//! Never part of an install; used by `agentskills validate`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use walkdir::WalkDir;

use super::{AGENTS_DIR, WORKFLOWS_DIR, frontmatter};
use crate::error::Result;

static SKILL_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"scripts/[A-Za-z0-9._-]+\.(?:js|py)|references/[A-Za-z0-9._-]+\.md")
        .expect("static pattern")
});

static WORKFLOW_ROLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.agents/agents/([A-Za-z0-9._-]+)\.md").expect("static pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// A SKILL.md names a script or reference that is not beside it.
    MissingRef,
    /// A persona declares a skill without a SKILL.md.
    MissingSkill,
    /// A workflow points at a persona document that does not exist.
    MissingWorkflowRole,
}

impl FindingKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MissingRef => "Missing ref",
            Self::MissingSkill => "Missing skill",
            Self::MissingWorkflowRole => "Missing workflow role",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub kind: FindingKind,
    /// Corpus-relative file the reference appears in.
    pub file: String,
    pub target: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} -> {}", self.kind.label(), self.file, self.target)
    }
}

/// Run every check against the corpus at `root`. Findings are sorted.
pub fn validate_corpus(root: &Path) -> Result<Vec<Finding>> {
    let mut findings = Vec::new();
    check_skill_refs(root, &mut findings)?;
    check_persona_skills(root, &mut findings)?;
    check_workflow_roles(root, &mut findings)?;
    findings.sort_by(|a, b| {
        (a.kind as u8, &a.file, &a.target).cmp(&(b.kind as u8, &b.file, &b.target))
    });
    Ok(findings)
}

fn files_under(dir: &Path, keep: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file() && keep(entry.path()))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn check_skill_refs(root: &Path, findings: &mut Vec<Finding>) -> Result<()> {
    let skill_files = files_under(&root.join("skills"), |path| {
        path.file_name().is_some_and(|name| name == "SKILL.md")
    });
    for skill_file in skill_files {
        let content = std::fs::read_to_string(&skill_file)?;
        let Some(dir) = skill_file.parent() else {
            continue;
        };
        for found in SKILL_REF.find_iter(&content) {
            if !dir.join(found.as_str()).exists() {
                findings.push(Finding {
                    kind: FindingKind::MissingRef,
                    file: relative(root, &skill_file),
                    target: found.as_str().to_string(),
                });
            }
        }
    }
    Ok(())
}

fn check_persona_skills(root: &Path, findings: &mut Vec<Finding>) -> Result<()> {
    let personas = files_under(&root.join(AGENTS_DIR), |path| {
        path.extension().is_some_and(|ext| ext == "md")
    });
    for persona in personas {
        let content = std::fs::read_to_string(&persona)?;
        for skill in frontmatter::parse(&content).skills {
            if !root.join("skills").join(&skill).join("SKILL.md").is_file() {
                findings.push(Finding {
                    kind: FindingKind::MissingSkill,
                    file: relative(root, &persona),
                    target: skill,
                });
            }
        }
    }
    Ok(())
}

fn check_workflow_roles(root: &Path, findings: &mut Vec<Finding>) -> Result<()> {
    let workflows = files_under(&root.join(WORKFLOWS_DIR), |path| {
        path.extension().is_some_and(|ext| ext == "md")
    });
    for workflow in workflows {
        let content = std::fs::read_to_string(&workflow)?;
        for captures in WORKFLOW_ROLE.captures_iter(&content) {
            let name = &captures[1];
            if !root.join(AGENTS_DIR).join(format!("{name}.md")).is_file() {
                findings.push(Finding {
                    kind: FindingKind::MissingWorkflowRole,
                    file: relative(root, &workflow),
                    target: format!(".agents/agents/{name}.md"),
                });
            }
        }
    }
    Ok(())
}
