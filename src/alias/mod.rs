//! Alias rewriting engine.
//!
//! A rewrite pass pins every Lambda function in a compiled template to a
//! published version through an `AWS::Lambda::Alias`, and optionally points
//! the resources that invoke those functions at the aliases instead.
//!
//! The pass is built from three parts, leaves first:
//!
//! - [`classifier`] - sorts resources into functions, versions, aliases, and
//!   dependents using the [`DEPENDENT_TYPES`](classifier::DEPENDENT_TYPES) table
//! - [`synthesizer`] - builds the alias resource for one function
//! - [`rewriter`] - retargets a dependent resource's function references
//!
//! [`apply`] composes them. It works on a copy of the template and returns it
//! only once every step has succeeded, so a failed pass leaves nothing behind.
//!
//! # Example
//!
//! ```rust
//! use sah_cli::alias::apply;
//! use sah_cli::config::RewriteConfig;
//! use sah_cli::template::Template;
//!
//! let template = Template::from_json_str(r#"{"Resources": {
//!   "WebLambdaFunction": {"Type": "AWS::Lambda::Function"},
//!   "WebLambdaVersionAbc": {
//!     "Type": "AWS::Lambda::Version",
//!     "Properties": {"FunctionName": {"Ref": "WebLambdaFunction"}}
//!   }
//! }}"#)?;
//!
//! let config = RewriteConfig {
//!     make_lambdas_active: true,
//!     ..RewriteConfig::default()
//! };
//! let rewritten = apply(&template, &config)?;
//! assert!(rewritten.resources().contains("WebLambdaFunctionAlias"));
//! assert!(!template.resources().contains("WebLambdaFunctionAlias"));
//! # Ok::<(), sah_cli::core::SahError>(())
//! ```

pub mod classifier;
pub mod rewriter;
pub mod synthesizer;

pub use classifier::{DEPENDENT_TYPES, DependentType, ResourceKind};
pub use rewriter::AliasMap;
pub use synthesizer::Alias;

use tracing::{debug, info};

use crate::config::RewriteConfig;
use crate::core::SahError;
use crate::template::Template;

/// What a rewrite pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Aliases added, in function document order
    pub aliases: Vec<Alias>,
    /// Dependent resources edited, with the number of references rewritten
    pub rewritten: Vec<(String, usize)>,
}

impl RewriteReport {
    /// Total references rewritten across all dependents.
    pub fn reference_count(&self) -> usize {
        self.rewritten.iter().map(|(_, count)| count).sum()
    }
}

/// Run a rewrite pass, returning the new template.
///
/// The input template is never modified.
///
/// # Errors
///
/// - [`SahError::UnpinnableResource`] if a function has no published version
/// - [`SahError::DuplicateLogicalId`] if an alias ID is already taken, which
///   is what happens when a template is passed through twice
pub fn apply(template: &Template, config: &RewriteConfig) -> Result<Template, SahError> {
    apply_with_report(template, config).map(|(template, _)| template)
}

/// Run a rewrite pass, returning the new template and what changed.
///
/// # Errors
///
/// As [`apply`].
pub fn apply_with_report(
    template: &Template,
    config: &RewriteConfig,
) -> Result<(Template, RewriteReport), SahError> {
    let mut output = template.clone();
    let mut report = RewriteReport::default();

    let alias_names = config.effective_alias_names();
    if alias_names.is_empty() {
        debug!("No alias names requested; template left unchanged");
        return Ok((output, report));
    }

    // Read from the input graph so the output's own additions are never classified
    let source = template.resources();
    for function_id in classifier::eligible_functions(source) {
        let Some(alias) = synthesizer::synthesize(source, function_id, &alias_names)? else {
            continue;
        };
        output.resources_mut().insert_new(alias.logical_id.clone(), alias.to_resource())?;
        debug!("Added alias '{}' ({}) for '{}'", alias.logical_id, alias.alias_name, function_id);
        report.aliases.push(alias);
    }

    if !config.use_active_alias_in_events {
        info!("Added {} alias(es); dependent resources left unchanged", report.aliases.len());
        return Ok((output, report));
    }

    let aliases: AliasMap = report
        .aliases
        .iter()
        .map(|alias| (alias.function_id.clone(), alias.logical_id.clone()))
        .collect();

    for (dependent_id, _) in classifier::dependent_resources(source) {
        let Some(resource) = output.resources_mut().get_mut(dependent_id) else {
            continue;
        };
        let count = rewriter::rewrite(resource, &aliases);
        if count > 0 {
            debug!("Rewrote {} reference(s) in '{}'", count, dependent_id);
            report.rewritten.push((dependent_id.to_string(), count));
        }
    }

    info!(
        "Added {} alias(es); rewrote {} reference(s) in {} resource(s)",
        report.aliases.len(),
        report.reference_count(),
        report.rewritten.len()
    );
    Ok((output, report))
}
