//! Document model and resolution.
//!
//! Personas declare skills in their frontmatter; skills bundle a primary
//! document with reference and script sub-documents; domains group personas.

pub mod domain;
pub mod frontmatter;
pub mod skill;
pub mod validation;

use tracing::debug;

use crate::error::{Result, SkillsError};
use crate::source::ContentSource;

pub use domain::{BuiltinDomains, DomainProvider, DomainResolver, DomainTable};
pub use skill::SkillResolver;

pub const GLOBAL_RULES_PATH: &str = "global-rules.md";
pub const WORKFLOWS_DIR: &str = "workflows";
pub const AGENTS_DIR: &str = "agents";

/// A named file inside a skill or the workflows directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubDocument {
    pub name: String,
    pub content: String,
}

/// A persona with its frontmatter split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaDocument {
    pub id: String,
    pub skills: Vec<String>,
    pub body: String,
}

impl PersonaDocument {
    /// Fetch `agents/<id>.md`. An absent document is [`SkillsError::NotFound`].
    pub fn fetch(source: &dyn ContentSource, id: &str) -> Result<Self> {
        check_identifier("persona", id)?;
        let raw = source
            .fetch(&format!("{AGENTS_DIR}/{id}.md"))?
            .ok_or_else(|| SkillsError::NotFound(format!("agent persona '{id}'")))?;
        let parsed = frontmatter::parse(&raw);
        Ok(Self {
            id: id.to_string(),
            skills: parsed.skills,
            body: parsed.body,
        })
    }
}

/// A skill's primary document plus its discovered sub-documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDocument {
    pub id: String,
    /// `None` when `SKILL.md` is missing from the corpus.
    pub content: Option<String>,
    pub references: Vec<SubDocument>,
    pub scripts: Vec<SubDocument>,
}

/// Persona ids available in the corpus (file stems under `agents/`).
#[must_use]
pub fn list_personas(source: &dyn ContentSource) -> Vec<String> {
    source
        .list_directory(AGENTS_DIR)
        .into_iter()
        .filter_map(|name| name.strip_suffix(".md").map(str::to_string))
        .collect()
}

/// Global rules, with a missing document read as empty.
pub fn fetch_global_rules(source: &dyn ContentSource) -> Result<String> {
    Ok(source.fetch(GLOBAL_RULES_PATH)?.unwrap_or_default())
}

/// Every markdown workflow document, in listing order.
pub fn fetch_workflows(source: &dyn ContentSource) -> Result<Vec<SubDocument>> {
    let names: Vec<String> = source
        .list_directory(WORKFLOWS_DIR)
        .into_iter()
        .filter(|name| is_markdown(name))
        .collect();
    fetch_documents(source, WORKFLOWS_DIR, &names)
}

/// Fetch `dir/<name>` for each name, dropping any that come back absent.
///
/// Fetches fan out across threads when the source allows it; the result
/// always follows the order of `names`.
pub fn fetch_documents(
    source: &dyn ContentSource,
    dir: &str,
    names: &[String],
) -> Result<Vec<SubDocument>> {
    let fetched: Vec<Result<Option<String>>> = if source.concurrent_fetches() && names.len() > 1 {
        std::thread::scope(|scope| {
            let handles: Vec<_> = names
                .iter()
                .map(|name| {
                    let path = format!("{dir}/{name}");
                    scope.spawn(move || source.fetch(&path))
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        Err(SkillsError::Fetch(format!("fetch worker panicked in {dir}")))
                    })
                })
                .collect()
        })
    } else {
        names
            .iter()
            .map(|name| source.fetch(&format!("{dir}/{name}")))
            .collect()
    };

    let mut documents = Vec::with_capacity(names.len());
    for (name, result) in names.iter().zip(fetched) {
        match result? {
            Some(content) => documents.push(SubDocument {
                name: name.clone(),
                content,
            }),
            None => debug!(dir, name = %name, "listed document vanished; skipping"),
        }
    }
    Ok(documents)
}

pub(crate) fn is_markdown(name: &str) -> bool {
    name.ends_with(".md")
}

/// Identifiers are path fragments; keep them inside the corpus.
pub(crate) fn check_identifier(kind: &str, id: &str) -> Result<()> {
    let valid = !id.is_empty()
        && id.split('/').all(|segment| {
            !segment.is_empty()
                && segment != "."
                && segment != ".."
                && !segment.contains('\\')
        });
    if valid {
        Ok(())
    } else {
        Err(SkillsError::Config(format!("invalid {kind} identifier {id:?}")))
    }
}
