//! Persisted record of generated files, one entry per assistant.

use std::collections::BTreeMap;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, SkillsError};
use crate::utils::fs::ensure_dir;

pub const MANIFEST_VERSION: u32 = 1;

/// Hidden directory under the working root that holds tool state.
pub const STATE_DIR: &str = ".agentskills";
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallManifest {
    pub version: u32,
    #[serde(default)]
    pub assistants: BTreeMap<String, AssistantRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRecord {
    /// Working-root-relative, `/`-separated, sorted.
    pub files: Vec<String>,
    pub updated_at: DateTime<Utc>,
    pub compat: bool,
}

impl Default for InstallManifest {
    fn default() -> Self {
        Self {
            version: MANIFEST_VERSION,
            assistants: BTreeMap::new(),
        }
    }
}

#[must_use]
pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(STATE_DIR).join(MANIFEST_FILE)
}

impl InstallManifest {
    /// Load the manifest; a missing or unreadable file is an empty manifest.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %path.display(), error = %err, "cannot read manifest; treating as empty");
                }
                return Self::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(manifest) => manifest,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unparsable manifest; treating as empty");
                Self::default()
            }
        }
    }

    /// Files previously recorded for `assistant`.
    #[must_use]
    pub fn files_for(&self, assistant: &str) -> Vec<String> {
        self.assistants
            .get(assistant)
            .map(|record| record.files.clone())
            .unwrap_or_default()
    }

    /// Replace one assistant's record; other entries are untouched.
    pub fn record(&mut self, assistant: &str, files: Vec<String>, compat: bool) {
        self.version = MANIFEST_VERSION;
        self.assistants.insert(
            assistant.to_string(),
            AssistantRecord {
                files,
                updated_at: Utc::now(),
                compat,
            },
        );
    }

    /// Write atomically via a sibling temp file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .ok_or_else(|| SkillsError::Config(format!("manifest path {} has no parent", path.display())))?;
        ensure_dir(dir)?;
        let payload = serde_json::to_string_pretty(self)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(payload.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.persist(path).map_err(|err| SkillsError::Io(err.error))?;
        Ok(())
    }
}
