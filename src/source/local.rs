use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::{ContentSource, check_logical_path};
use crate::error::Result;

/// Corpus rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    #[must_use]
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ContentSource for LocalSource {
    fn fetch(&self, path: &str) -> Result<Option<String>> {
        check_logical_path(path)?;
        let full = self.root.join(path);
        match std::fs::read_to_string(&full) {
            Ok(content) => {
                trace!(path, bytes = content.len(), "read local document");
                Ok(Some(content))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path, "local document absent");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn list_directory(&self, path: &str) -> Vec<String> {
        if check_logical_path(path).is_err() {
            return Vec::new();
        }
        let Ok(entries) = std::fs::read_dir(self.root.join(path)) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_file()))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();
        names
    }
}
