//! E2E Scenario: re-running installs against previously generated state

use super::fixture::{E2EFixture, standard_corpus};

fn manifest_files(fixture: &E2EFixture, assistant: &str) -> Vec<String> {
    let raw = fixture.read(".agentskills/manifest.json").expect("manifest");
    let manifest: serde_json::Value = serde_json::from_str(&raw).unwrap();
    manifest["assistants"][assistant]["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_reinstall_is_idempotent() {
    let mut fixture = E2EFixture::new("reinstall_idempotent");
    standard_corpus(&fixture);
    let args = ["--persona", "game-architect", "--ai", "claude", "--robot"];

    fixture.log_step("First install");
    let first = fixture.install(&args);
    fixture.assert_success(&first, "first install");
    let after_first = fixture.checkpoint("first");
    let files_first = manifest_files(&fixture, "claude");

    fixture.log_step("Second install");
    let second = fixture.install(&args);
    fixture.assert_success(&second, "second install");
    let after_second = fixture.checkpoint("second");

    assert_eq!(files_first, manifest_files(&fixture, "claude"));
    let generated_files = |snapshot: &super::fixture::Snapshot| -> Vec<String> {
        snapshot
            .keys()
            .filter(|path| !path.starts_with(".agentskills/"))
            .cloned()
            .collect()
    };
    assert_eq!(generated_files(&after_first), generated_files(&after_second));

    let report = &second.json()["data"]["reports"][0]["reconcile"];
    let generated = report["generated"].as_array().unwrap().len();
    assert_eq!(report["unchanged"].as_u64().unwrap() as usize, generated);
    assert!(report["removed"].as_array().unwrap().is_empty());
    assert!(fixture.checkpoint_named("first").is_some());
}

#[test]
fn test_dry_run_leaves_disk_untouched() {
    let mut fixture = E2EFixture::new("dry_run");
    standard_corpus(&fixture);

    let output = fixture.install(&["--persona", "game-architect", "--ai", "claude"]);
    fixture.assert_success(&output, "seed install");
    fixture.corpus.persona("game-architect", &[], "# Game Architect v2");
    let before = fixture.checkpoint("before-dry-run");

    fixture.log_step("Dry run after the persona dropped its skills");
    let dry = fixture.install(&[
        "--persona",
        "game-architect",
        "--ai",
        "claude",
        "--dry-run",
        "--robot",
    ]);
    fixture.assert_success(&dry, "dry run");
    assert_eq!(fixture.snapshot(), before);

    let real = fixture.install(&["--persona", "game-architect", "--ai", "claude", "--robot"]);
    fixture.assert_success(&real, "real run");

    let dry_report = &dry.json()["data"]["reports"][0]["reconcile"];
    let real_report = &real.json()["data"]["reports"][0]["reconcile"];
    assert_eq!(dry_report["dry_run"], true);
    assert_eq!(dry_report["generated"], real_report["generated"]);
    assert_eq!(dry_report["removed"], real_report["removed"]);
    assert!(!dry_report["removed"].as_array().unwrap().is_empty());
}

#[test]
fn test_dropped_skill_is_cleaned_up() {
    let fixture = E2EFixture::new("dropped_skill");
    standard_corpus(&fixture);
    std::fs::create_dir_all(fixture.root().join(".claude")).unwrap();
    std::fs::write(fixture.root().join(".claude/settings.json"), "{}").unwrap();

    let output = fixture.install(&["--persona", "game-architect", "--ai", "claude"]);
    fixture.assert_success(&output, "first install");
    assert!(fixture.exists(".claude/skills/game/engine-design/SKILL.md"));

    fixture.corpus.persona("game-architect", &["game/profiling"], "# Game Architect");
    let output = fixture.install(&["--persona", "game-architect", "--ai", "claude"]);
    fixture.assert_success(&output, "second install");

    assert!(!fixture.exists(".claude/skills/game/engine-design"));
    assert!(fixture.exists(".claude/skills/game/profiling/SKILL.md"));
    assert_eq!(fixture.read(".claude/settings.json").as_deref(), Some("{}"));
    assert!(
        !manifest_files(&fixture, "claude")
            .iter()
            .any(|path| path.contains("engine-design"))
    );
}

#[test]
fn test_no_cleanup_keeps_stale_files() {
    let fixture = E2EFixture::new("no_cleanup");
    standard_corpus(&fixture);

    let output = fixture.install(&["--persona", "game-architect", "--ai", "claude"]);
    fixture.assert_success(&output, "first install");

    fixture.corpus.persona("game-architect", &[], "# Game Architect");
    let output = fixture.install(&[
        "--persona",
        "game-architect",
        "--ai",
        "claude",
        "--no-cleanup",
    ]);
    fixture.assert_success(&output, "second install");

    assert!(fixture.exists(".claude/skills/game/engine-design/SKILL.md"));
    assert!(
        !manifest_files(&fixture, "claude")
            .iter()
            .any(|path| path.contains("engine-design"))
    );
}

#[test]
fn test_legacy_layout_is_swept() {
    let fixture = E2EFixture::new("legacy_sweep");
    standard_corpus(&fixture);
    for legacy in [
        ".claude/skills/agents/game-architect.md",
        ".claude/skills/skills/game/engine-design/SKILL.md",
        ".agent_scripts/game_engine-design/bench.py",
    ] {
        let path = fixture.root().join(legacy);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "old").unwrap();
    }

    let output = fixture.install(&["--persona", "game-architect", "--ai", "claude"]);
    fixture.assert_success(&output, "claude install");
    assert!(!fixture.exists(".claude/skills/agents"));
    assert!(!fixture.exists(".claude/skills/skills"));
    // Script extraction belongs to the rule-file layouts.
    assert!(fixture.exists(".agent_scripts/game_engine-design/bench.py"));

    let output = fixture.install(&["--persona", "game-architect", "--ai", "cursor"]);
    fixture.assert_success(&output, "cursor install");
    assert!(!fixture.exists(".agent_scripts"));
}

#[test]
fn test_assistants_keep_separate_manifest_entries() {
    let fixture = E2EFixture::new("separate_entries");
    standard_corpus(&fixture);

    let output = fixture.install(&["--persona", "senior-backend", "--ai", "codex"]);
    fixture.assert_success(&output, "codex install");
    let output = fixture.install(&["--persona", "game-architect", "--ai", "gemini"]);
    fixture.assert_success(&output, "gemini install");

    assert!(fixture.exists(".codex/senior-backend.md"));
    assert!(
        manifest_files(&fixture, "codex")
            .contains(&".codex/senior-backend.md".to_string())
    );
    assert!(
        manifest_files(&fixture, "gemini")
            .contains(&".gemini/game-architect.md".to_string())
    );
}
