//! Skill dependency resolution.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::{SkillDocument, check_identifier, fetch_documents, is_markdown};
use crate::error::Result;
use crate::source::ContentSource;

/// Gathers a skill's `SKILL.md`, `references/*.md` and `scripts/*`.
pub struct SkillResolver<'a> {
    source: &'a dyn ContentSource,
}

impl<'a> SkillResolver<'a> {
    #[must_use]
    pub fn new(source: &'a dyn ContentSource) -> Self {
        Self { source }
    }

    pub fn resolve(&self, id: &str) -> Result<SkillDocument> {
        check_identifier("skill", id)?;
        let base = format!("skills/{id}");

        let content = self.source.fetch(&format!("{base}/SKILL.md"))?;
        if content.is_none() {
            warn!(skill = id, "SKILL.md not found; installing without primary content");
        }

        let references_dir = format!("{base}/references");
        let reference_names: Vec<String> = self
            .source
            .list_directory(&references_dir)
            .into_iter()
            .filter(|name| is_markdown(name))
            .collect();
        let scripts_dir = format!("{base}/scripts");
        let script_names = self.source.list_directory(&scripts_dir);

        let references = fetch_documents(self.source, &references_dir, &reference_names)?;
        let scripts = fetch_documents(self.source, &scripts_dir, &script_names)?;

        debug!(
            skill = id,
            references = references.len(),
            scripts = scripts.len(),
            "resolved skill"
        );

        Ok(SkillDocument {
            id: id.to_string(),
            content,
            references,
            scripts,
        })
    }

    /// Resolve each declared skill once, in declaration order.
    ///
    /// Repeated identifiers are dropped after their first occurrence.
    pub fn resolve_all(&self, ids: &[String]) -> Result<Vec<SkillDocument>> {
        let mut seen = HashSet::new();
        let mut skills = Vec::with_capacity(ids.len());
        for id in ids {
            if !seen.insert(id.as_str()) {
                warn!(skill = %id, "skill declared more than once; keeping first");
                continue;
            }
            skills.push(self.resolve(id)?);
        }
        Ok(skills)
    }
}
