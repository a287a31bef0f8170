//! E2E fixture: an isolated working root with a local corpus and a handle
//! on the built binary.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use agentskills::test_utils::CorpusFixture;
use assert_cmd::Command;
use serde_json::Value;
use walkdir::WalkDir;

pub struct CommandOutput {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl CommandOutput {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout).unwrap_or_else(|err| {
            panic!("stdout is not JSON ({err}):\n{}", self.stdout)
        })
    }
}

/// Every file under the working root, keyed by `/`-separated relative path.
pub type Snapshot = BTreeMap<String, Vec<u8>>;

pub struct E2EFixture {
    pub scenario: String,
    pub corpus: CorpusFixture,
    pub config_path: PathBuf,
    checkpoints: Vec<(String, Snapshot)>,
}

impl E2EFixture {
    pub fn new(scenario: &str) -> Self {
        let corpus = CorpusFixture::new();
        let config_path = corpus.workspace().join("e2e-config.toml");
        std::fs::write(&config_path, "").expect("write e2e config");
        println!("[E2E] {scenario}: workspace {}", corpus.workspace().display());
        Self {
            scenario: scenario.to_string(),
            corpus,
            config_path,
            checkpoints: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.corpus.workspace()
    }

    pub fn log_step(&self, step: &str) {
        println!("[E2E] {} :: {step}", self.scenario);
    }

    /// Run the binary against this fixture's working root and config.
    pub fn run(&self, args: &[&str]) -> CommandOutput {
        let start = Instant::now();
        let output = Command::cargo_bin("agentskills")
            .expect("agentskills binary")
            .arg("--quiet")
            .arg("--config")
            .arg(&self.config_path)
            .arg("--root")
            .arg(self.root())
            .args(args)
            .output()
            .expect("run agentskills");
        let result = CommandOutput {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            elapsed: start.elapsed(),
        };
        println!(
            "[E2E] {} :: agentskills {} -> {} ({:?})",
            self.scenario,
            args.join(" "),
            result.exit_code,
            result.elapsed
        );
        result
    }

    /// `install --local` plus `args`.
    pub fn install(&self, args: &[&str]) -> CommandOutput {
        let mut full = vec!["install", "--local"];
        full.extend_from_slice(args);
        self.run(&full)
    }

    pub fn assert_success(&self, output: &CommandOutput, label: &str) {
        assert!(
            output.success,
            "{label} failed ({}):\nstdout:\n{}\nstderr:\n{}",
            output.exit_code, output.stdout, output.stderr
        );
    }

    pub fn assert_failure(&self, output: &CommandOutput, label: &str) {
        assert!(
            !output.success,
            "{label} unexpectedly succeeded:\n{}",
            output.stdout
        );
    }

    pub fn read(&self, relative: &str) -> Option<String> {
        self.corpus.read(relative)
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.root().join(relative).exists()
    }

    /// Capture the working root and remember it under `label`.
    pub fn checkpoint(&mut self, label: &str) -> Snapshot {
        let snapshot = self.snapshot();
        println!("[E2E] {} :: checkpoint {label} ({} files)", self.scenario, snapshot.len());
        self.checkpoints.push((label.to_string(), snapshot.clone()));
        snapshot
    }

    pub fn checkpoint_named(&self, label: &str) -> Option<&Snapshot> {
        self.checkpoints
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, snapshot)| snapshot)
    }

    pub fn snapshot(&self) -> Snapshot {
        WalkDir::new(self.root())
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| {
                let relative = entry
                    .path()
                    .strip_prefix(self.root())
                    .expect("inside root")
                    .to_string_lossy()
                    .replace('\\', "/");
                let bytes = std::fs::read(entry.path()).expect("read snapshot file");
                (relative, bytes)
            })
            .collect()
    }

    /// Files present in the working root outside the corpus and config.
    pub fn generated_files(&self) -> Vec<String> {
        self.snapshot()
            .into_keys()
            .filter(|path| !path.starts_with(".agents/") && !path.starts_with("e2e-config"))
            .collect()
    }
}

/// Corpus shared by most scenarios.
pub fn standard_corpus(fixture: &E2EFixture) {
    let corpus = &fixture.corpus;
    corpus.file("global-rules.md", "Always write tests.");
    corpus.persona(
        "game-architect",
        &["game/engine-design", "game/engine-design"],
        "# Game Architect\nDesigns engines.",
    );
    corpus.persona("game-performance-engineer", &["game/profiling"], "# Perf");
    corpus.persona("senior-backend", &["development/api-design"], "# Senior Backend");
    corpus.skill("game/engine-design", "Loops and systems.");
    corpus.file("skills/game/engine-design/references/ecs.md", "Entities and components.");
    corpus.file("skills/game/engine-design/scripts/bench.py", "print('bench')");
    corpus.skill("game/profiling", "Measure first.");
    corpus.skill("development/api-design", "Resources and verbs.");
    corpus.file("workflows/review.md", "Review with .agents/agents/senior-backend.md.");
}
