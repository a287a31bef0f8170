//! Apply write-sets against previously generated state.
//!
//! A [`Reconciler`] lives for one assistant. Write-sets from each persona are
//! applied as they arrive; [`Reconciler::commit`] then removes files the
//! previous manifest listed but this run did not produce, sweeps legacy
//! layouts, and records the new file set.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use super::format::WriteSet;
use super::manifest::{InstallManifest, manifest_path};
use crate::error::Result;
use crate::profiles::Assistant;
use crate::utils::fs::{ensure_dir, prune_empty_parents, read_optional, remove_file_if_exists, rooted};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    pub dry_run: bool,
    /// Delete stale and legacy files.
    pub cleanup: bool,
    /// Mirror workflows into command directories.
    pub compat: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            cleanup: true,
            compat: true,
        }
    }
}

/// What one assistant's reconciliation did (or, in a dry run, would do).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub assistant: Assistant,
    pub generated: Vec<String>,
    /// Generated files whose on-disk content already matched.
    pub unchanged: usize,
    pub removed: Vec<String>,
    pub dry_run: bool,
}

pub struct Reconciler {
    root: PathBuf,
    assistant: Assistant,
    options: ReconcileOptions,
    generated: BTreeSet<String>,
    /// On-disk content of each generated path before this run touched it.
    baseline: BTreeMap<String, Option<String>>,
    unchanged: BTreeSet<String>,
    legacy: BTreeSet<String>,
}

impl Reconciler {
    #[must_use]
    pub fn new(root: &Path, assistant: Assistant, options: ReconcileOptions) -> Self {
        Self {
            root: root.to_path_buf(),
            assistant,
            options,
            generated: BTreeSet::new(),
            baseline: BTreeMap::new(),
            unchanged: BTreeSet::new(),
            legacy: BTreeSet::new(),
        }
    }

    /// Record and (unless dry run) persist every write in `set`.
    ///
    /// A path counts as unchanged when its final content equals what was on
    /// disk before the run, so paths shared by several personas report the
    /// same way in a dry run and a real one.
    pub fn apply(&mut self, set: &WriteSet) -> Result<()> {
        for write in &set.writes {
            let full = rooted(&self.root, &write.path)?;
            let baseline = self
                .baseline
                .entry(write.path.clone())
                .or_insert_with(|| read_optional(&full).ok().flatten());
            if baseline.as_deref() == Some(write.content.as_str()) {
                self.unchanged.insert(write.path.clone());
            } else {
                self.unchanged.remove(&write.path);
            }

            if self.options.dry_run {
                if !self.unchanged.contains(&write.path) {
                    debug!(path = %write.path, "would write");
                }
            } else if read_optional(&full).ok().flatten().as_deref() != Some(write.content.as_str()) {
                if let Some(parent) = full.parent() {
                    ensure_dir(parent)?;
                }
                std::fs::write(&full, &write.content)?;
                debug!(path = %write.path, "wrote");
            }
            self.generated.insert(write.path.clone());
        }
        self.legacy.extend(set.legacy.iter().cloned());
        Ok(())
    }

    /// Diff against the stored manifest, clean up, and persist the new record.
    pub fn commit(self) -> Result<ReconcileReport> {
        let path = manifest_path(&self.root);
        let mut manifest = InstallManifest::load(&path);
        let previous = manifest.files_for(self.assistant.name());
        let mut removed = Vec::new();

        if self.options.cleanup {
            for stale in previous.iter().filter(|p| !self.generated.contains(*p)) {
                self.remove(stale)?;
                removed.push(stale.clone());
            }
            for candidate in self.legacy.iter().filter(|p| !self.generated.contains(*p)) {
                if removed.contains(candidate) {
                    continue;
                }
                let Ok(full) = rooted(&self.root, candidate) else {
                    continue;
                };
                if full.is_file() {
                    self.remove(candidate)?;
                    removed.push(candidate.clone());
                }
            }
        }

        let generated: Vec<String> = self.generated.iter().cloned().collect();
        if !self.options.dry_run {
            manifest.record(self.assistant.name(), generated.clone(), self.options.compat);
            manifest.save(&path)?;
        }

        info!(
            assistant = %self.assistant,
            generated = generated.len(),
            removed = removed.len(),
            dry_run = self.options.dry_run,
            "reconciled"
        );

        Ok(ReconcileReport {
            assistant: self.assistant,
            unchanged: self.unchanged.len(),
            generated,
            removed,
            dry_run: self.options.dry_run,
        })
    }

    fn remove(&self, relative: &str) -> Result<()> {
        let full = rooted(&self.root, relative)?;
        debug!(path = relative, dry_run = self.options.dry_run, "removing");
        if !self.options.dry_run {
            remove_file_if_exists(&full)?;
            prune_empty_parents(&full, &self.root);
        }
        Ok(())
    }
}
