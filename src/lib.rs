//! SAH - Serverless Alias Helper
//!
//! Pins the Lambda functions of a compiled CloudFormation template to named,
//! immutable versions. For every function, a rewrite pass adds an
//! `AWS::Lambda::Alias` that points at the function's published
//! `AWS::Lambda::Version`, and can retarget the resources that invoke the
//! function (HTTP API integrations, schedule rules, event source mappings and
//! SNS subscriptions) at that alias instead of `$LATEST`. Invoke permissions
//! are never moved.
//!
//! # Modules
//!
//! ## Engine
//! - [`template`] - template document, resources, references, property paths
//! - [`alias`] - classification, alias synthesis, reference rewriting, and the
//!   [`alias::apply`] pass that composes them
//!
//! ## Plugin surface
//! - [`config`] - `custom.sah` options and service definition loading
//! - [`hooks`] - lifecycle events and the [`hooks::SahPlugin`] adapter
//! - [`notify`] - best-effort post-deploy notification
//! - [`cli`] - the `sah` command-line interface
//!
//! ## Supporting
//! - [`core`] - error types and user-facing error rendering
//! - [`constants`] - names and defaults shared across modules
//!
//! # Configuration
//!
//! ```yaml
//! custom:
//!   sah:
//!     makeLambdasActive: true
//!     useActiveAliasInEvents: true
//! ```
//!
//! # Example
//!
//! ```rust
//! use sah_cli::config::ServiceDefinition;
//! use sah_cli::hooks::SahPlugin;
//! use sah_cli::template::Template;
//!
//! let service = ServiceDefinition::from_yaml_str(
//!     "custom:\n  sah:\n    makeLambdasActive: true\n",
//! )?;
//! let plugin = SahPlugin::new(&service)?;
//!
//! let template = Template::from_json_str(r#"{"Resources": {
//!   "ApiLambdaFunction": {"Type": "AWS::Lambda::Function"},
//!   "ApiLambdaVersion1": {
//!     "Type": "AWS::Lambda::Version",
//!     "Properties": {"FunctionName": {"Ref": "ApiLambdaFunction"}}
//!   }
//! }}"#)?;
//! let (rewritten, report) = plugin.update_template(&template)?;
//!
//! assert_eq!(report.aliases[0].alias_name, "INACTIVE");
//! assert!(rewritten.resources().contains("ApiLambdaFunctionAlias"));
//! # Ok::<(), sah_cli::core::SahError>(())
//! ```

pub mod alias;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod hooks;
pub mod notify;
pub mod template;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
