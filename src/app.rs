use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::cli::commands::SourceArgs;
use crate::config::Config;
use crate::core::domain::DOMAINS_PATH;
use crate::error::Result;
use crate::install::manifest::STATE_DIR;
use crate::source::{CORPUS_DIR, RemoteRepo, RemoteSettings, SourceConfig};

pub struct AppContext {
    /// Directory installs write into; all generated paths are relative to it.
    pub root: PathBuf,
    pub config: Config,
    pub output_format: OutputFormat,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let root = match &cli.root {
            Some(root) => root.clone(),
            None => Self::find_root()?,
        };
        let config = Config::load(cli.config.as_deref(), &root)?;

        Ok(Self {
            root,
            config,
            output_format: cli.output_format(),
        })
    }

    /// Nearest ancestor holding `.agentskills/`, else the current directory.
    fn find_root() -> Result<PathBuf> {
        let cwd = std::env::current_dir()?;
        if let Some(found) = find_upwards(&cwd, STATE_DIR)? {
            if let Some(parent) = found.parent() {
                return Ok(parent.to_path_buf());
            }
        }
        Ok(cwd)
    }

    #[must_use]
    pub const fn robot(&self) -> bool {
        matches!(self.output_format, OutputFormat::Json)
    }

    /// Workspace-level domain table that overrides the corpus one.
    #[must_use]
    pub fn workspace_domains_path(&self) -> PathBuf {
        self.root.join(STATE_DIR).join(DOMAINS_PATH)
    }

    /// Local corpus root: flag, then config, then `<root>/.agents`.
    #[must_use]
    pub fn local_root(&self, flag: Option<&Path>) -> PathBuf {
        let chosen = flag
            .map(Path::to_path_buf)
            .or_else(|| self.config.source.local_root.clone())
            .unwrap_or_else(|| PathBuf::from(CORPUS_DIR));
        if chosen.is_absolute() {
            chosen
        } else {
            self.root.join(chosen)
        }
    }

    /// Resolve the content source once for this invocation.
    pub fn source_config(&self, args: &SourceArgs) -> Result<SourceConfig> {
        if args.local || args.local_root.is_some() {
            return Ok(SourceConfig::Local {
                root: self.local_root(args.local_root.as_deref()),
            });
        }

        let source = &self.config.source;
        let repo = RemoteRepo::parse(args.repo.as_deref().unwrap_or(&source.repo))?;
        let branch = args.branch.as_deref().unwrap_or(&source.branch);
        let mut settings = RemoteSettings::new(
            repo,
            branch,
            source.raw_base_url.as_deref(),
            source.api_base_url.as_deref(),
        );
        if let Some(agent) = &source.user_agent {
            settings.user_agent.clone_from(agent);
        }
        Ok(SourceConfig::Remote(settings))
    }
}

fn find_upwards(start: &Path, name: &str) -> Result<Option<PathBuf>> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(name);
        if candidate.is_dir() {
            return Ok(Some(candidate));
        }
        current = dir.parent();
    }
    Ok(None)
}
