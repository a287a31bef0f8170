//! Supported AI coding assistants and the output contract for each.
//!
//! The registry is closed: every assistant maps to exactly one
//! [`OutputMode`], a target directory, a file extension and the
//! command-mirroring directories used for compatibility export.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkillsError};

/// Value of `--ai` that expands to every default-included assistant.
pub const ALL: &str = "all";

/// Shape of the files written for an assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// One `<persona>-instructions.md` bundling everything.
    Monolithic,
    /// `agents/` + `skills/<id>/` folder tree with scripts extracted.
    Folder,
    /// Rule files carrying a small metadata header.
    #[serde(rename = "cursorlike")]
    CursorLike,
    /// Combined rule file without a header, workflows as siblings.
    Flat,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Monolithic => "monolithic",
            Self::Folder => "folder",
            Self::CursorLike => "cursorlike",
            Self::Flat => "flat",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assistant {
    Cursor,
    Windsurf,
    Continue,
    Claude,
    Kiro,
    Antigravity,
    Opencode,
    Droid,
    Copilot,
    Codebuddy,
    Gemini,
    Codex,
    Qoder,
    Roocode,
    Trae,
}

/// Static output contract for one assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssistantProfile {
    pub assistant: Assistant,
    pub mode: OutputMode,
    /// Relative to the working root.
    pub target_dir: &'static str,
    pub role_ext: &'static str,
    /// Relative to the working root, not the target directory.
    pub command_dirs: &'static [&'static str],
    pub include_in_all: bool,
}

impl Assistant {
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Cursor,
            Self::Windsurf,
            Self::Continue,
            Self::Claude,
            Self::Kiro,
            Self::Antigravity,
            Self::Opencode,
            Self::Droid,
            Self::Copilot,
            Self::Codebuddy,
            Self::Gemini,
            Self::Codex,
            Self::Qoder,
            Self::Roocode,
            Self::Trae,
        ]
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cursor => "cursor",
            Self::Windsurf => "windsurf",
            Self::Continue => "continue",
            Self::Claude => "claude",
            Self::Kiro => "kiro",
            Self::Antigravity => "antigravity",
            Self::Opencode => "opencode",
            Self::Droid => "droid",
            Self::Copilot => "copilot",
            Self::Codebuddy => "codebuddy",
            Self::Gemini => "gemini",
            Self::Codex => "codex",
            Self::Qoder => "qoder",
            Self::Roocode => "roocode",
            Self::Trae => "trae",
        }
    }

    #[must_use]
    pub const fn profile(self) -> AssistantProfile {
        use OutputMode::{CursorLike, Flat, Folder, Monolithic};

        let (mode, target_dir, role_ext, command_dirs, include_in_all): (
            OutputMode,
            &'static str,
            &'static str,
            &'static [&'static str],
            bool,
        ) = match self {
            Self::Cursor => (CursorLike, ".cursor/rules", ".mdc", &[".cursor/commands"], true),
            Self::Windsurf => (CursorLike, ".windsurf/rules", ".md", &[".windsurf/workflows"], false),
            Self::Continue => (CursorLike, ".continue/rules", ".md", &[".continue/prompts"], false),
            Self::Claude => (Folder, ".claude", ".md", &[".claude/commands"], true),
            Self::Kiro => (Folder, ".kiro", ".md", &[], false),
            Self::Antigravity => (Folder, ".gemini/antigravity", ".md", &[".agent/workflows"], false),
            Self::Opencode => (Folder, ".opencode", ".md", &[".opencode/command"], false),
            Self::Droid => (Folder, ".factory", ".md", &[".factory/commands"], false),
            Self::Copilot => (Monolithic, ".github", ".md", &[], true),
            Self::Codebuddy => (Monolithic, ".codebuddy", ".md", &[], false),
            Self::Gemini => (Flat, ".gemini", ".md", &[".gemini/commands"], false),
            Self::Codex => (Flat, ".codex", ".md", &[".codex/prompts"], false),
            Self::Qoder => (Flat, ".qoder", ".md", &[], false),
            Self::Roocode => (Flat, ".roo", ".md", &[".roo/commands"], false),
            Self::Trae => (Flat, ".trae/rules", ".md", &[], false),
        };

        AssistantProfile {
            assistant: self,
            mode,
            target_dir,
            role_ext,
            command_dirs,
            include_in_all,
        }
    }

    /// Expand an `--ai` value into concrete assistants.
    ///
    /// `all` yields every default-included assistant in registry order.
    pub fn resolve(value: &str) -> Result<Vec<Self>> {
        let value = value.trim().to_lowercase();
        if value == ALL {
            return Ok(Self::all()
                .iter()
                .copied()
                .filter(|assistant| assistant.profile().include_in_all)
                .collect());
        }
        Ok(vec![value.parse()?])
    }
}

impl FromStr for Assistant {
    type Err = SkillsError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|assistant| assistant.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = Self::all().iter().map(|a| a.name()).collect();
                SkillsError::Config(format!(
                    "unsupported AI assistant '{s}' (expected one of: {}, {ALL})",
                    names.join(", ")
                ))
            })
    }
}

impl fmt::Display for Assistant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
