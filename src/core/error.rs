//! Error handling for SAH
//!
//! This module provides the error taxonomy of the alias rewrite engine and the
//! user-friendly error reporting used by the CLI. The error system is designed
//! around two core principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Error Categories
//!
//! - **Configuration**: [`SahError::Configuration`] - missing or invalid plugin options.
//!   The message always follows the `sah-plugin: ERROR: <message>` pattern.
//! - **Rewrite pass**: [`SahError::UnpinnableResource`], [`SahError::DuplicateLogicalId`] -
//!   fatal conditions that abort the whole pass with nothing committed.
//! - **References**: [`SahError::MalformedReference`] - raised only where a value is
//!   required to be a reference expression.
//! - **Documents**: [`SahError::InvalidTemplate`], [`SahError::JsonError`],
//!   [`SahError::YamlError`], [`SahError::IoError`].
//!
//! Notification failures are deliberately absent: the post-deploy call reports an
//! outcome value instead of an error (see [`crate::notify`]).
//!
//! # Examples
//!
//! ```rust,no_run
//! use sah_cli::core::{SahError, user_friendly_error};
//!
//! let error = SahError::UnpinnableResource {
//!     logical_id: "WebLambdaFunction".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for SAH operations
///
/// Each variant represents one failure mode of configuration loading or of a
/// rewrite pass. Fatal rewrite errors carry the logical ID involved so the user
/// can locate the offending resource in the compiled template.
#[derive(Error, Debug)]
pub enum SahError {
    /// Plugin configuration is missing or invalid
    ///
    /// Raised before any template is touched. The display text is the literal
    /// message surfaced to the deployment tool's failure channel, prefixed with
    /// [`crate::constants::PLUGIN_NAME`].
    #[error("sah-plugin: ERROR: {message}")]
    Configuration {
        /// Human-readable description of what is missing or wrong
        message: String,
    },

    /// A function was selected for aliasing but has no published version
    #[error("Function '{logical_id}' has no published version to pin an alias to")]
    UnpinnableResource {
        /// Logical ID of the function
        logical_id: String,
    },

    /// A synthesized resource collides with an existing logical ID
    ///
    /// This indicates a defect in the naming scheme and is never resolved by
    /// renaming.
    #[error("Logical ID '{logical_id}' already exists in the template")]
    DuplicateLogicalId {
        /// The colliding logical ID
        logical_id: String,
    },

    /// A value that must be a reference expression is not one
    #[error("Value is not a reference expression: {value}")]
    MalformedReference {
        /// Compact JSON rendering of the offending value
        value: String,
    },

    /// The compiled template does not have the expected document shape
    #[error("Invalid template: {reason}")]
    InvalidTemplate {
        /// Why the document was rejected
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Generic error for cases not covered by specific variants
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl SahError {
    /// Build a [`SahError::Configuration`] from any message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl Clone for SahError {
    fn clone(&self) -> Self {
        match self {
            Self::Configuration {
                message,
            } => Self::Configuration {
                message: message.clone(),
            },
            Self::UnpinnableResource {
                logical_id,
            } => Self::UnpinnableResource {
                logical_id: logical_id.clone(),
            },
            Self::DuplicateLogicalId {
                logical_id,
            } => Self::DuplicateLogicalId {
                logical_id: logical_id.clone(),
            },
            Self::MalformedReference {
                value,
            } => Self::MalformedReference {
                value: value.clone(),
            },
            Self::InvalidTemplate {
                reason,
            } => Self::InvalidTemplate {
                reason: reason.clone(),
            },
            // Wrapped library errors are not Clone; keep their message
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::JsonError(e) => Self::Other {
                message: format!("JSON error: {e}"),
            },
            Self::YamlError(e) => Self::Other {
                message: format!("YAML error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// Pairs a [`SahError`] with an optional suggestion and optional details, and
/// knows how to print itself to a terminal.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying SAH error
    pub error: SahError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`SahError`]
    #[must_use]
    pub const fn new(error: SahError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`SahError`] anywhere in the error chain (so errors wrapped with
/// `anyhow::Context` keep their suggestions) and [`std::io::Error`]; anything
/// else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(sah_error) = error.chain().find_map(|cause| cause.downcast_ref::<SahError>()) {
        let mut ctx = create_error_context(sah_error.clone());
        // downcast_ref sees through context layers, so compare messages instead
        let outer = error.to_string();
        if outer != sah_error.to_string() {
            ctx.details = Some(match ctx.details.take() {
                Some(details) => format!("{outer}\n{details}"),
                None => outer,
            });
        }
        return ctx;
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::NotFound {
            return ErrorContext::new(SahError::Other {
                message: error.to_string(),
            })
            .with_suggestion("Check that the file exists and the path is correct");
        }
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();

    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(SahError::Other {
        message,
    })
}

/// Suggestion for a configuration error, chosen by what went wrong.
fn configuration_suggestion(message: &str) -> &'static str {
    if message.starts_with("Missing custom configuration object")
        || message.starts_with("Missing custom.sah configuration object")
    {
        "Add a `custom.sah` section to your service definition, e.g.\n  custom:\n    sah:\n      activeAliasName: live"
    } else if message.starts_with("Missing custom.sah.activeAliasName") {
        "Set custom.sah.activeAliasName to a non-empty name, or remove it to use the default"
    } else if message.starts_with("Empty alias name") {
        "Remove the empty entry from custom.sah.aliases"
    } else {
        "Check the types of the custom.sah options: aliases is a list of names, the flags are booleans, the rest are strings"
    }
}

/// Map each [`SahError`] variant to an [`ErrorContext`] with tailored suggestions.
fn create_error_context(error: SahError) -> ErrorContext {
    match &error {
        SahError::Configuration {
            message,
        } => {
            let suggestion = configuration_suggestion(message);
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        SahError::UnpinnableResource {
            ..
        } => ErrorContext::new(error)
            .with_details("An alias can only point at an AWS::Lambda::Version resource that publishes the function")
            .with_suggestion("Enable function versioning (provider.versionFunctions: true) and package again"),
        SahError::DuplicateLogicalId {
            ..
        } => ErrorContext::new(error)
            .with_details("Alias resources are named <FunctionLogicalId>Alias and must not already exist")
            .with_suggestion("Rewrite the freshly compiled template, not one that was already rewritten"),
        SahError::InvalidTemplate {
            ..
        }
        | SahError::JsonError(_) => ErrorContext::new(error).with_suggestion(
            "Pass the compiled CloudFormation template, e.g. .serverless/cloudformation-template-update-stack.json",
        ),
        SahError::YamlError(_) => ErrorContext::new(error)
            .with_suggestion("Check the YAML syntax of your service definition (serverless.yml)"),
        _ => ErrorContext::new(error),
    }
}
