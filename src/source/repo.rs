//! Remote repository naming and resolved source settings.

use std::fmt;
use std::path::PathBuf;

use crate::error::{Result, SkillsError};

pub const DEFAULT_REPO: &str = "AgentSkills/AgentSkills";
pub const DEFAULT_BRANCH: &str = "main";

/// Directory inside the content repository that holds the corpus.
pub const CORPUS_DIR: &str = ".agents";

/// `owner/repo` pair normalized from a URL, SSH spec, or literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepo {
    pub owner: String,
    pub repo: String,
}

impl RemoteRepo {
    /// Accepts `owner/repo`, `https://github.com/owner/repo(.git)`,
    /// `github.com/owner/repo`, `git@github.com:owner/repo(.git)` and
    /// `ssh://git@github.com/owner/repo(.git)`.
    pub fn parse(spec: &str) -> Result<Self> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(SkillsError::Config("repository spec is empty".to_string()));
        }

        let path = if let Some(rest) = trimmed.strip_prefix("git@") {
            rest.split_once(':').map(|(_, path)| path)
        } else if let Some(rest) = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .or_else(|| trimmed.strip_prefix("ssh://"))
        {
            rest.split_once('/').map(|(_, path)| path)
        } else if let Some(rest) = trimmed.strip_prefix("github.com/") {
            Some(rest)
        } else {
            Some(trimmed)
        };

        let path = path
            .map(|p| p.trim_end_matches('/'))
            .map(|p| p.strip_suffix(".git").unwrap_or(p))
            .ok_or_else(|| invalid(spec))?;

        let mut parts = path.split('/');
        let (Some(owner), Some(repo), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid(spec));
        };
        if !is_valid_segment(owner) || !is_valid_segment(repo) {
            return Err(invalid(spec));
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl fmt::Display for RemoteRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn invalid(spec: &str) -> SkillsError {
    SkillsError::Config(format!(
        "invalid repository spec {spec:?} (expected owner/repo, a GitHub URL, or git@github.com:owner/repo)"
    ))
}

/// Resolved settings for the remote content host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSettings {
    pub repo: RemoteRepo,
    pub branch: String,
    pub raw_base_url: String,
    pub api_base_url: String,
    pub user_agent: String,
}

impl RemoteSettings {
    /// Derive GitHub raw/API base URLs unless explicit overrides are given.
    #[must_use]
    pub fn new(
        repo: RemoteRepo,
        branch: impl Into<String>,
        raw_override: Option<&str>,
        api_override: Option<&str>,
    ) -> Self {
        let branch = branch.into();
        let raw_base_url = raw_override.map_or_else(
            || {
                format!(
                    "https://raw.githubusercontent.com/{}/{}/{branch}/{CORPUS_DIR}",
                    repo.owner, repo.repo
                )
            },
            |url| url.trim_end_matches('/').to_string(),
        );
        let api_base_url = api_override.map_or_else(
            || {
                format!(
                    "https://api.github.com/repos/{}/{}/contents/{CORPUS_DIR}",
                    repo.owner, repo.repo
                )
            },
            |url| url.trim_end_matches('/').to_string(),
        );
        Self {
            repo,
            branch,
            raw_base_url,
            api_base_url,
            user_agent: format!("agentskills/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Which content source an invocation reads from. Built once per invocation
/// and passed by reference to every source and resolver call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Local { root: PathBuf },
    Remote(RemoteSettings),
}

impl SourceConfig {
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Local { root } => format!("local {}", root.display()),
            Self::Remote(settings) => format!("{}@{}", settings.repo, settings.branch),
        }
    }
}
