//! Filesystem utilities.
//!
//! Helper functions for file operations under the working root.

use std::path::{Component, Path, PathBuf};

use crate::error::{Result, SkillsError};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Read a file to string, returning None if it doesn't exist.
pub fn read_optional(path: impl AsRef<Path>) -> Result<Option<String>> {
    match std::fs::read_to_string(path.as_ref()) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Join a `/`-separated relative path onto `root`, refusing anything that
/// would land outside it.
pub fn rooted(root: &Path, relative: &str) -> Result<PathBuf> {
    let candidate = Path::new(relative);
    let inside = !relative.is_empty()
        && candidate
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
    if !inside {
        return Err(SkillsError::Config(format!(
            "refusing path {relative:?} outside {}",
            root.display()
        )));
    }
    Ok(root.join(candidate))
}

/// Remove `path`; a file that is already gone counts as removed.
pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Delete now-empty ancestors of `path`, stopping before `root`.
pub fn prune_empty_parents(path: &Path, root: &Path) {
    let mut current = path.parent();
    while let Some(dir) = current {
        if dir == root || !dir.starts_with(root) {
            break;
        }
        if std::fs::remove_dir(dir).is_err() {
            break;
        }
        current = dir.parent();
    }
}
