//! Shared test utilities for agentskills.

pub mod fixtures;

pub use fixtures::CorpusFixture;
