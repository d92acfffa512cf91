//! Retargeting of function references onto aliases.
//!
//! For each property path of a dependent resource's type, a reference to an
//! aliased function is replaced by the equivalent reference to its alias:
//!
//! | before                         | after                               |
//! |--------------------------------|-------------------------------------|
//! | `{"Ref": "Fn"}`                | `{"Ref": "FnAlias"}`                |
//! | `{"Fn::GetAtt": ["Fn", "Arn"]}`| `{"Fn::GetAtt": ["FnAlias", "AliasArn"]}` |
//!
//! A dotted `{"Fn::GetAtt": "Fn.Arn"}` is rewritten to the dotted
//! `{"Fn::GetAtt": "FnAlias.AliasArn"}`.
//!
//! Other attributes of a function have no alias counterpart and are left as
//! they are, as are references to functions without an alias. An alias's own
//! logical ID is never a key of the alias map, so rewriting is idempotent.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::constants::{ALIAS_ARN_ATTRIBUTE, FUNCTION_ARN_ATTRIBUTE};
use crate::template::{Reference, Resource};

use super::classifier::ResourceKind;

/// Function logical ID to alias logical ID.
pub type AliasMap = HashMap<String, String>;

/// Rewrite the function references of a dependent resource in place.
///
/// Returns the number of references rewritten. Resources that are not
/// dependent types are left untouched.
pub fn rewrite(resource: &mut Resource, aliases: &AliasMap) -> usize {
    let ResourceKind::Dependent(dependent) = ResourceKind::of(resource) else {
        return 0;
    };
    let Some(properties) = resource.properties_mut() else {
        return 0;
    };

    let mut rewritten = 0;
    for path in dependent.paths {
        path.for_each_mut(properties, |value| {
            rewritten += rewrite_value(value, aliases);
        });
    }
    rewritten
}

/// Rewrite a reference, or each reference element of an array.
fn rewrite_value(value: &mut Value, aliases: &AliasMap) -> usize {
    if let Value::Array(items) = value {
        return items.iter_mut().map(|item| usize::from(rewrite_reference(item, aliases))).sum();
    }
    usize::from(rewrite_reference(value, aliases))
}

fn rewrite_reference(value: &mut Value, aliases: &AliasMap) -> bool {
    let Some(reference) = Reference::parse(value) else {
        return false;
    };
    let Some(alias_id) = aliases.get(&reference.logical_id) else {
        return false;
    };
    match retarget(&reference, alias_id) {
        Some(retargeted) => {
            *value = retargeted.to_value_like(value);
            true
        }
        None => {
            debug!(
                "Leaving '{}' of '{}' unchanged: aliases have no such attribute",
                reference.attribute.as_deref().unwrap_or_default(),
                reference.logical_id
            );
            false
        }
    }
}

/// The alias reference equivalent to a function reference, if there is one.
fn retarget(reference: &Reference, alias_id: &str) -> Option<Reference> {
    match reference.attribute.as_deref() {
        None => Some(Reference::to(alias_id)),
        Some(FUNCTION_ARN_ATTRIBUTE) => Some(Reference::get_att(alias_id, ALIAS_ARN_ATTRIBUTE)),
        Some(_) => None,
    }
}
