//! Alias resource synthesis.
//!
//! One `AWS::Lambda::Alias` is materialized per function per pass. Its logical
//! ID is the function's logical ID plus `Alias`, so it cannot encode the alias
//! name; when several names are requested the last one wins.

use tracing::{debug, warn};

use crate::constants::{ALIAS_LOGICAL_ID_SUFFIX, LAMBDA_ALIAS_TYPE, VERSION_ATTRIBUTE};
use crate::core::SahError;
use crate::template::{Reference, Resource, ResourceGraph};

use super::classifier::published_versions;

/// A synthesized alias pinned to one published version of a function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    /// Logical ID of the alias resource (`<function>Alias`)
    pub logical_id: String,
    /// User-facing alias name, e.g. `INACTIVE` or `live`
    pub alias_name: String,
    /// Logical ID of the aliased function
    pub function_id: String,
    /// `Fn::GetAtt` of the published version's number
    pub target_version: Reference,
}

impl Alias {
    /// Logical ID of the alias synthesized for `function_id`.
    pub fn logical_id_for(function_id: &str) -> String {
        format!("{function_id}{ALIAS_LOGICAL_ID_SUFFIX}")
    }

    /// The CloudFormation declaration of this alias.
    pub fn to_resource(&self) -> Resource {
        Resource::new(LAMBDA_ALIAS_TYPE)
            .with_property("FunctionName", Reference::to(&self.function_id).to_value())
            .with_property("FunctionVersion", self.target_version.to_value())
            .with_property("Name", serde_json::Value::String(self.alias_name.clone()))
            .with_depends_on([self.function_id.as_str()])
    }
}

/// Synthesize the alias for one function.
///
/// `alias_names` is the deduplicated list of requested names; the last one is
/// used and the others are discarded. Returns `Ok(None)` when no name is
/// requested.
///
/// # Errors
///
/// Returns [`SahError::UnpinnableResource`] if the function has no
/// `AWS::Lambda::Version` to pin to.
pub fn synthesize(
    graph: &ResourceGraph,
    function_id: &str,
    alias_names: &[String],
) -> Result<Option<Alias>, SahError> {
    let Some((alias_name, discarded)) = alias_names.split_last() else {
        return Ok(None);
    };
    if !discarded.is_empty() {
        debug!(
            "Function '{}' gets alias '{}'; discarding {:?} (one alias per function)",
            function_id, alias_name, discarded
        );
    }

    let versions = published_versions(graph, function_id);
    let Some(version_id) = versions.last() else {
        return Err(SahError::UnpinnableResource {
            logical_id: function_id.to_string(),
        });
    };
    if versions.len() > 1 {
        warn!(
            "Function '{}' has {} published versions; pinning to the last one, '{}'",
            function_id,
            versions.len(),
            version_id
        );
    }

    Ok(Some(Alias {
        logical_id: Alias::logical_id_for(function_id),
        alias_name: alias_name.clone(),
        function_id: function_id.to_string(),
        target_version: Reference::get_att(*version_id, VERSION_ATTRIBUTE),
    }))
}
