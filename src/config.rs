use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkillsError};
use crate::install::manifest::STATE_DIR;
use crate::source::{DEFAULT_BRANCH, DEFAULT_REPO};

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceSection,
    #[serde(default)]
    pub install: InstallSection,
}

impl Config {
    /// Layer user, project (or an explicit file) and environment settings.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| env_string("AGENTSKILLS_CONFIG").map(PathBuf::from));

        if let Some(path) = explicit {
            let patch = Self::load_patch(&path)?.ok_or_else(|| {
                SkillsError::Config(format!("config file {} does not exist", path.display()))
            })?;
            config.merge_patch(patch);
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_patch(&project_config_path(root))? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        match dirs::config_dir() {
            Some(dir) => Self::load_patch(&dir.join("agentskills").join(CONFIG_FILE)),
            None => Ok(None),
        }
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| SkillsError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| SkillsError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.source {
            self.source.merge(patch);
        }
        if let Some(patch) = patch.install {
            self.install.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("AGENTSKILLS_REPO") {
            self.source.repo = value;
        }
        if let Some(value) = env_string("AGENTSKILLS_BRANCH") {
            self.source.branch = value;
        }
        if let Some(value) = env_string("AGENTSKILLS_RAW_BASE_URL") {
            self.source.raw_base_url = Some(value);
        }
        if let Some(value) = env_string("AGENTSKILLS_API_BASE_URL") {
            self.source.api_base_url = Some(value);
        }
        if let Some(value) = env_string("AGENTSKILLS_LOCAL_ROOT") {
            self.source.local_root = Some(PathBuf::from(value));
        }
        if let Some(value) = env_bool("AGENTSKILLS_COMPAT")? {
            self.install.compat = value;
        }
        if let Some(value) = env_bool("AGENTSKILLS_CLEANUP")? {
            self.install.cleanup = value;
        }
        Ok(())
    }
}

#[must_use]
pub fn project_config_path(root: &Path) -> PathBuf {
    root.join(STATE_DIR).join(CONFIG_FILE)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSection {
    /// `owner/repo`, a GitHub URL, or an SSH spec.
    pub repo: String,
    pub branch: String,
    pub raw_base_url: Option<String>,
    pub api_base_url: Option<String>,
    /// Local corpus root; relative paths resolve against the working root.
    pub local_root: Option<PathBuf>,
    pub user_agent: Option<String>,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            repo: DEFAULT_REPO.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            raw_base_url: None,
            api_base_url: None,
            local_root: None,
            user_agent: None,
        }
    }
}

impl SourceSection {
    fn merge(&mut self, patch: SourcePatch) {
        if let Some(value) = patch.repo {
            self.repo = value;
        }
        if let Some(value) = patch.branch {
            self.branch = value;
        }
        if let Some(value) = patch.raw_base_url {
            self.raw_base_url = Some(value);
        }
        if let Some(value) = patch.api_base_url {
            self.api_base_url = Some(value);
        }
        if let Some(value) = patch.local_root {
            self.local_root = Some(value);
        }
        if let Some(value) = patch.user_agent {
            self.user_agent = Some(value);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallSection {
    pub compat: bool,
    pub cleanup: bool,
}

impl Default for InstallSection {
    fn default() -> Self {
        Self {
            compat: true,
            cleanup: true,
        }
    }
}

impl InstallSection {
    fn merge(&mut self, patch: InstallPatch) {
        if let Some(value) = patch.compat {
            self.compat = value;
        }
        if let Some(value) = patch.cleanup {
            self.cleanup = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigPatch {
    pub source: Option<SourcePatch>,
    pub install: Option<InstallPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SourcePatch {
    pub repo: Option<String>,
    pub branch: Option<String>,
    pub raw_base_url: Option<String>,
    pub api_base_url: Option<String>,
    pub local_root: Option<PathBuf>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct InstallPatch {
    pub compat: Option<bool>,
    pub cleanup: Option<bool>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_bool(key: &str) -> Result<Option<bool>> {
    let Some(value) = env_string(key) else {
        return Ok(None);
    };
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(SkillsError::Config(format!("invalid {key} value {value}"))),
    }
}
