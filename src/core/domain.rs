//! Domain bundles: named groups of personas installed together.
//!
//! Tables come from an ordered list of providers. A provider either has a
//! table or it does not; for any domain, the first provider with an entry for
//! it wins and that entry replaces lower ones wholesale.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, SkillsError};
use crate::source::ContentSource;

pub type DomainTable = BTreeMap<String, Vec<String>>;

/// Logical path of the in-repository domain table.
pub const DOMAINS_PATH: &str = "domains.json";

pub trait DomainProvider {
    fn name(&self) -> &'static str;

    /// The provider's table, or `None` when it has nothing to offer.
    fn load(&self) -> Option<DomainTable>;
}

/// `domains.json` kept next to the working root's generated state.
pub struct WorkspaceDomainFile {
    path: PathBuf,
}

impl WorkspaceDomainFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DomainProvider for WorkspaceDomainFile {
    fn name(&self) -> &'static str {
        "workspace"
    }

    fn load(&self) -> Option<DomainTable> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        parse_table(&raw, &self.path.display().to_string())
    }
}

/// `domains.json` served by the content source.
pub struct SourceDomainFile<'a> {
    source: &'a dyn ContentSource,
}

impl<'a> SourceDomainFile<'a> {
    #[must_use]
    pub fn new(source: &'a dyn ContentSource) -> Self {
        Self { source }
    }
}

impl DomainProvider for SourceDomainFile<'_> {
    fn name(&self) -> &'static str {
        "source"
    }

    fn load(&self) -> Option<DomainTable> {
        match self.source.fetch(DOMAINS_PATH) {
            Ok(Some(raw)) => parse_table(&raw, DOMAINS_PATH),
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "could not fetch {DOMAINS_PATH}; falling back");
                None
            }
        }
    }
}

/// Compiled-in fallback table.
pub struct BuiltinDomains;

impl BuiltinDomains {
    #[must_use]
    pub fn table() -> DomainTable {
        [
            ("backend", &["senior-backend", "database-architect", "code-auditor"][..]),
            ("frontend", &["senior-frontend", "ui-designer", "accessibility-auditor"][..]),
            ("game", &["game-architect", "game-performance-engineer"][..]),
            ("ai", &["ai-engineer", "prompt-engineer"][..]),
            ("devops", &["devops-engineer", "infrastructure-architect"][..]),
            ("quality", &["qa-engineer", "code-auditor"][..]),
        ]
        .into_iter()
        .map(|(domain, personas)| {
            (
                domain.to_string(),
                personas.iter().map(|p| (*p).to_string()).collect(),
            )
        })
        .collect()
    }
}

impl DomainProvider for BuiltinDomains {
    fn name(&self) -> &'static str {
        "builtin"
    }

    fn load(&self) -> Option<DomainTable> {
        Some(Self::table())
    }
}

fn parse_table(raw: &str, origin: &str) -> Option<DomainTable> {
    match serde_json::from_str::<DomainTable>(raw) {
        Ok(table) => Some(table),
        Err(err) => {
            warn!(origin, error = %err, "ignoring unparsable domain table");
            None
        }
    }
}

/// Provider tables loaded once, highest precedence first.
pub struct DomainResolver {
    layers: Vec<(&'static str, DomainTable)>,
}

impl DomainResolver {
    /// Load every provider; ones without a table are skipped.
    #[must_use]
    pub fn from_providers(providers: &[&dyn DomainProvider]) -> Self {
        let layers = providers
            .iter()
            .filter_map(|provider| {
                let table = provider.load();
                debug!(
                    provider = provider.name(),
                    present = table.is_some(),
                    "domain provider"
                );
                table.map(|table| (provider.name(), table))
            })
            .collect();
        Self { layers }
    }

    /// Workspace file, then the source's `domains.json`, then built-ins.
    #[must_use]
    pub fn standard(workspace_file: &Path, source: &dyn ContentSource) -> Self {
        let workspace = WorkspaceDomainFile::new(workspace_file);
        let remote = SourceDomainFile::new(source);
        Self::from_providers(&[&workspace, &remote, &BuiltinDomains])
    }

    /// Personas for `domain`, from the highest-precedence table that has it.
    pub fn resolve(&self, domain: &str) -> Result<Vec<String>> {
        self.layers
            .iter()
            .find_map(|(provider, table)| {
                table.get(domain).map(|personas| {
                    debug!(domain, provider, count = personas.len(), "resolved domain");
                    personas.clone()
                })
            })
            .ok_or_else(|| SkillsError::NotFound(format!("domain '{domain}'")))
    }

    /// Shallow merge of all layers.
    #[must_use]
    pub fn table(&self) -> DomainTable {
        let mut merged = DomainTable::new();
        for (_, table) in self.layers.iter().rev() {
            for (domain, personas) in table {
                merged.insert(domain.clone(), personas.clone());
            }
        }
        merged
    }
}
