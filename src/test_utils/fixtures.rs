use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::source::CORPUS_DIR;

/// Isolated working root with a content corpus at `<root>/.agents`.
pub struct CorpusFixture {
    pub temp_dir: TempDir,
    pub workspace: PathBuf,
    pub corpus: PathBuf,
}

impl Default for CorpusFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let workspace = temp_dir.path().to_path_buf();
        let corpus = workspace.join(CORPUS_DIR);
        std::fs::create_dir_all(&corpus).expect("Failed to create corpus dir");

        Self {
            temp_dir,
            workspace,
            corpus,
        }
    }

    /// Corpus root, suitable for a local source.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.corpus
    }

    /// Working root that installs write into.
    #[must_use]
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Write a corpus file at a logical path.
    pub fn file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.corpus.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Write `agents/<id>.md` declaring `skills` in its frontmatter.
    pub fn persona(&self, id: &str, skills: &[&str], body: &str) -> PathBuf {
        let mut doc = String::from("---\nname: ");
        doc.push_str(id);
        doc.push_str("\nskills:\n");
        for skill in skills {
            doc.push_str("  - ");
            doc.push_str(skill);
            doc.push('\n');
        }
        doc.push_str("---\n");
        doc.push_str(body);
        doc.push('\n');
        self.file(&format!("agents/{id}.md"), &doc)
    }

    /// Write `skills/<id>/SKILL.md`.
    pub fn skill(&self, id: &str, content: &str) -> PathBuf {
        self.file(&format!("skills/{id}/SKILL.md"), content)
    }

    /// Read a file under the working root, `None` if absent.
    #[must_use]
    pub fn read(&self, relative_path: &str) -> Option<String> {
        std::fs::read_to_string(self.workspace.join(relative_path)).ok()
    }
}
