//! E2E Scenario: listing the corpus

use super::fixture::{E2EFixture, standard_corpus};

#[test]
fn test_list_personas_from_local_corpus() {
    let fixture = E2EFixture::new("list_personas");
    standard_corpus(&fixture);

    let output = fixture.run(&["--robot", "list", "personas", "--local"]);
    fixture.assert_success(&output, "list personas");

    let json = output.json();
    let personas: Vec<_> = json["data"]["personas"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p.as_str().unwrap())
        .collect();
    assert_eq!(
        personas,
        vec!["game-architect", "game-performance-engineer", "senior-backend"]
    );
}

#[test]
fn test_list_domains_merges_corpus_table() {
    let fixture = E2EFixture::new("list_domains");
    standard_corpus(&fixture);
    fixture
        .corpus
        .file("domains.json", r#"{"game": ["game-architect"], "docs": ["tech-writer"]}"#);

    let output = fixture.run(&["--robot", "list", "domains", "--local"]);
    fixture.assert_success(&output, "list domains");

    let domains = &output.json()["data"]["domains"];
    assert_eq!(domains["game"], serde_json::json!(["game-architect"]));
    assert_eq!(domains["docs"], serde_json::json!(["tech-writer"]));
    assert!(domains["backend"].is_array());
}

#[test]
fn test_list_everything_human() {
    let fixture = E2EFixture::new("list_all");
    standard_corpus(&fixture);

    let output = fixture.run(&["list", "--local"]);
    fixture.assert_success(&output, "list");
    assert!(output.stdout.contains("Personas"));
    assert!(output.stdout.contains("Domains"));
    assert!(output.stdout.contains("Assistants"));
    assert!(output.stdout.contains("senior-backend"));
}
