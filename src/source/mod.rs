//! Read-only access to the persona/skill corpus.
//!
//! Two interchangeable implementations sit behind [`ContentSource`]: a local
//! directory tree and a remote content host. Callers select one per
//! invocation through [`SourceConfig`] and never branch on which is in use.

mod local;
mod remote;
mod repo;

use std::path::Component;
use std::path::Path;

pub use local::LocalSource;
pub use remote::RemoteSource;
pub use repo::{
    CORPUS_DIR, DEFAULT_BRANCH, DEFAULT_REPO, RemoteRepo, RemoteSettings, SourceConfig,
};

use crate::error::{Result, SkillsError};

/// Uniform accessor over the corpus, addressed by `/`-separated logical paths.
pub trait ContentSource: Send + Sync {
    /// Fetch a document. `Ok(None)` means the document does not exist.
    fn fetch(&self, path: &str) -> Result<Option<String>>;

    /// File names directly under `path`, sorted lexically.
    ///
    /// Discovery is best-effort: any failure yields an empty list.
    fn list_directory(&self, path: &str) -> Vec<String>;

    /// Whether independent fetches may be issued in parallel.
    fn concurrent_fetches(&self) -> bool {
        false
    }
}

/// Build the source selected by `config`.
pub fn open(config: &SourceConfig) -> Result<Box<dyn ContentSource>> {
    match config {
        SourceConfig::Local { root } => Ok(Box::new(LocalSource::new(root))),
        SourceConfig::Remote(settings) => Ok(Box::new(RemoteSource::new(settings)?)),
    }
}

/// Reject logical paths that could escape the corpus root.
pub(crate) fn check_logical_path(path: &str) -> Result<()> {
    let escapes = Path::new(path).components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes || path.contains('\\') {
        return Err(SkillsError::Config(format!(
            "logical path {path:?} escapes the content root"
        )));
    }
    Ok(())
}
