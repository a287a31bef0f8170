//! E2E test suite entry point.

mod fixture;
mod install_workflow;
mod list_workflow;
mod reconcile_workflow;
mod validate_workflow;
