//! E2E Scenario: corpus validation

use super::fixture::{E2EFixture, standard_corpus};

#[test]
fn test_validate_clean_corpus_passes() {
    let fixture = E2EFixture::new("validate_clean");
    standard_corpus(&fixture);

    let output = fixture.run(&["validate"]);
    fixture.assert_success(&output, "validate");
    assert!(output.stdout.contains("passed"));
}

#[test]
fn test_validate_reports_broken_references() {
    let fixture = E2EFixture::new("validate_broken");
    standard_corpus(&fixture);
    fixture
        .corpus
        .persona("qa-engineer", &["quality/missing"], "# QA");
    fixture
        .corpus
        .skill("game/profiling", "Run scripts/flamegraph.py first.");
    fixture
        .corpus
        .file("workflows/release.md", "Hand off to .agents/agents/release-manager.md.");

    let output = fixture.run(&["--robot", "validate"]);
    fixture.assert_failure(&output, "validate");

    let json = output.json();
    assert_eq!(json["data"]["passed"], false);
    let findings = json["data"]["findings"].as_array().unwrap();
    let kinds: Vec<_> = findings.iter().map(|f| f["kind"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["missing_ref", "missing_skill", "missing_workflow_role"]);
    assert_eq!(findings[0]["target"], "scripts/flamegraph.py");
}

#[test]
fn test_validate_custom_root() {
    let fixture = E2EFixture::new("validate_custom_root");
    let corpus = fixture.root().join("content");
    std::fs::create_dir_all(corpus.join("agents")).unwrap();
    std::fs::write(
        corpus.join("agents/solo.md"),
        "---\nskills:\n  - a/one\n---\n# Solo\n",
    )
    .unwrap();

    let output = fixture.run(&["validate", "--local-root", "content"]);
    fixture.assert_failure(&output, "validate");
    assert!(output.stdout.contains("[Missing skill] agents/solo.md -> a/one"));
    assert!(output.stderr.contains("validation failed"));
}
