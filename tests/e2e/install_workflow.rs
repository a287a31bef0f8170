//! E2E Scenario: installing personas for each output mode

use super::fixture::{E2EFixture, standard_corpus};

fn fixture(scenario: &str) -> E2EFixture {
    let fixture = E2EFixture::new(scenario);
    standard_corpus(&fixture);
    fixture
}

#[test]
fn test_folder_install_for_claude() {
    let fixture = fixture("folder_install");

    fixture.log_step("Install game-architect for claude");
    let output = fixture.install(&["--persona", "game-architect", "--ai", "claude"]);
    fixture.assert_success(&output, "install");

    assert_eq!(
        fixture.read(".claude/agents/game-architect.md").as_deref(),
        Some("# Game Architect\nDesigns engines.")
    );
    assert_eq!(
        fixture.read(".claude/skills/global-rules.md").as_deref(),
        Some("Always write tests.")
    );
    assert_eq!(
        fixture
            .read(".claude/skills/game/engine-design/references/ecs.md")
            .as_deref(),
        Some("Entities and components.")
    );
    assert!(fixture.exists(".claude/skills/game/engine-design/SKILL.md"));
    assert!(fixture.exists(".claude/skills/game/engine-design/scripts/bench.py"));
    assert!(fixture.exists(".claude/skills/workflows/review.md"));
    assert!(fixture.exists(".claude/commands/review.md"));
    assert!(fixture.exists(".agentskills/manifest.json"));
}

#[test]
fn test_monolithic_install_writes_single_file() {
    let fixture = fixture("monolithic_install");

    let output = fixture.install(&["--persona", "game-architect", "--ai", "copilot"]);
    fixture.assert_success(&output, "install");

    let generated: Vec<_> = fixture
        .generated_files()
        .into_iter()
        .filter(|path| !path.starts_with(".agentskills/"))
        .collect();
    assert_eq!(generated, vec![".github/game-architect-instructions.md"]);

    let bundle = fixture.read(".github/game-architect-instructions.md").unwrap();
    assert!(bundle.starts_with("# Global Ecosystem Rules"));
    // Declared twice in frontmatter, emitted once.
    assert_eq!(bundle.matches("## Skill: game/engine-design").count(), 1);
    assert!(bundle.contains("### Reference: ecs.md"));
    assert!(bundle.contains("## Workflow: review"));
}

#[test]
fn test_cursorlike_install() {
    let fixture = fixture("cursorlike_install");

    let output = fixture.install(&["--persona", "senior-backend", "--ai", "cursor"]);
    fixture.assert_success(&output, "install");

    let persona = fixture.read(".cursor/rules/senior-backend.mdc").unwrap();
    assert!(persona.starts_with("---\ndescription: Agent Persona - senior-backend\n"));
    assert!(persona.contains("## Capability: development/api-design\nResources and verbs."));
    assert!(fixture.read(".cursor/rules/global-rules.mdc").unwrap().contains("Always write tests."));
    assert!(fixture.exists(".cursor/commands/review.md"));
}

#[test]
fn test_flat_install_writes_prefixed_workflows() {
    let fixture = fixture("flat_install");

    let output = fixture.install(&["--persona", "senior-backend", "--ai", "codex"]);
    fixture.assert_success(&output, "install");

    let combined = fixture.read(".codex/senior-backend.md").unwrap();
    assert!(combined.starts_with("# Global Rules\nAlways write tests."));
    assert_eq!(
        fixture.read(".codex/workflows-review.md").as_deref(),
        Some("Review with .agents/agents/senior-backend.md.")
    );
    assert!(fixture.exists(".codex/prompts/review.md"));
}

#[test]
fn test_no_compat_skips_command_dirs() {
    let fixture = fixture("no_compat");

    let output = fixture.install(&[
        "--persona",
        "game-architect",
        "--ai",
        "claude",
        "--no-compat",
    ]);
    fixture.assert_success(&output, "install");

    assert!(fixture.exists(".claude/skills/workflows/review.md"));
    assert!(!fixture.exists(".claude/commands"));

    let manifest: serde_json::Value =
        serde_json::from_str(&fixture.read(".agentskills/manifest.json").unwrap()).unwrap();
    assert_eq!(manifest["assistants"]["claude"]["compat"], false);
}

#[test]
fn test_all_installs_default_assistants() {
    let fixture = fixture("all_assistants");

    let output = fixture.install(&["--persona", "senior-backend"]);
    fixture.assert_success(&output, "install");

    assert!(fixture.exists(".cursor/rules/senior-backend.mdc"));
    assert!(fixture.exists(".claude/agents/senior-backend.md"));
    assert!(fixture.exists(".github/senior-backend-instructions.md"));
    assert!(!fixture.exists(".codex"));

    let manifest: serde_json::Value =
        serde_json::from_str(&fixture.read(".agentskills/manifest.json").unwrap()).unwrap();
    let keys: Vec<_> = manifest["assistants"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(keys, vec!["claude", "copilot", "cursor"]);
}

#[test]
fn test_domain_install_expands_bundle() {
    let fixture = fixture("domain_install");

    let output = fixture.install(&["--domain", "game", "--ai", "claude", "--robot"]);
    fixture.assert_success(&output, "install domain");

    let json = output.json();
    assert_eq!(json["status"], "ok");
    let installed = json["data"]["reports"][0]["installed"].as_array().unwrap();
    assert_eq!(installed[0], "game-architect");
    assert_eq!(installed[1], "game-performance-engineer");
    assert!(fixture.exists(".claude/agents/game-performance-engineer.md"));
}

#[test]
fn test_workspace_domain_file_overrides_builtin() {
    let fixture = fixture("domain_override");
    std::fs::create_dir_all(fixture.root().join(".agentskills")).unwrap();
    std::fs::write(
        fixture.root().join(".agentskills/domains.json"),
        r#"{"game": ["senior-backend"]}"#,
    )
    .unwrap();

    let output = fixture.install(&["--domain", "game", "--ai", "claude"]);
    fixture.assert_success(&output, "install domain");

    assert!(fixture.exists(".claude/agents/senior-backend.md"));
    assert!(!fixture.exists(".claude/agents/game-architect.md"));
}

#[test]
fn test_unknown_domain_fails_before_writing() {
    let fixture = fixture("unknown_domain");

    let output = fixture.install(&["--domain", "astronomy", "--ai", "claude"]);
    fixture.assert_failure(&output, "install unknown domain");
    assert!(output.stderr.contains("domain 'astronomy'"));
    assert!(fixture.generated_files().is_empty());
}

#[test]
fn test_partial_failure_reports_batch() {
    let fixture = fixture("partial_failure");

    let output = fixture.install(&["--domain", "backend", "--ai", "claude"]);
    fixture.assert_failure(&output, "install backend domain");

    // senior-backend exists in the corpus; the other two do not.
    assert!(fixture.exists(".claude/agents/senior-backend.md"));
    assert!(output.stdout.contains("Failures"));
    assert!(output.stdout.contains("database-architect @ claude"));
    assert!(output.stderr.contains("2 of 3 install(s) failed"));
    assert!(!fixture.exists(".agentskills/manifest.json"));
}
