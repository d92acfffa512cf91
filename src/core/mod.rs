//! Core types and functionality for SAH
//!
//! This module holds the error taxonomy shared by every other module and the
//! helpers that turn those errors into user-facing CLI output.
//!
//! # Modules
//!
//! ## `error` - Error Handling
//!
//! - [`SahError`] - Enumerated error types covering all SAH failure modes
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! # Examples
//!
//! ```rust
//! use sah_cli::core::{SahError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn example_operation() -> Result<String> {
//!     Err(SahError::configuration("Missing custom configuration object").into())
//! }
//!
//! if let Err(e) = example_operation() {
//!     let friendly = user_friendly_error(e);
//!     assert!(friendly.to_string().starts_with("sah-plugin: ERROR:"));
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, SahError, user_friendly_error};
