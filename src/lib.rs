//! agentskills - install agent personas and skills into AI assistant layouts.
//!
//! A persona declares skills in its frontmatter. Installing resolves those
//! skills from a local or remote corpus, formats them into the layout an
//! assistant expects, and reconciles the result against what was generated
//! last time.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod install;
pub mod profiles;
pub mod source;
pub mod test_utils;
pub mod utils;

pub use error::{Result, SkillsError};
