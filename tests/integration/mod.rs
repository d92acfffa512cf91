//! Integration test suite for SAH
//!
//! End-to-end tests that drive the `sah` binary against temporary service
//! directories.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **rewrite**: template rewriting, output destinations, failure atomicity
//! - **validate**: configuration errors and dry runs
//! - **notify**: post-deploy notification against a local endpoint
//! - **error_scenarios**: error rendering and exit codes

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod error_scenarios;
mod notify;
mod rewrite;
mod validate;
