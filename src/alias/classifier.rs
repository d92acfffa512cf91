//! Resource classification by role.
//!
//! Every resource in a template falls into one [`ResourceKind`]. Dependent
//! resources are recognized through [`DEPENDENT_TYPES`], a table of resource
//! types and the property paths where they hold a function's identity.
//! Supporting a new dependent type means adding a row to that table.

use crate::constants::{LAMBDA_ALIAS_TYPE, LAMBDA_FUNCTION_TYPE, LAMBDA_VERSION_TYPE};
use crate::template::{PropertyPath, Reference, Resource, ResourceGraph, Segment};

/// A resource type whose properties may reference a function.
#[derive(Debug, PartialEq, Eq)]
pub struct DependentType {
    /// CloudFormation type tag
    pub resource_type: &'static str,
    /// Paths under `Properties` that may hold a function reference
    pub paths: &'static [PropertyPath],
}

/// Dependent resource types and their reference-bearing property paths.
pub static DEPENDENT_TYPES: &[DependentType] = &[
    DependentType {
        resource_type: "AWS::ApiGatewayV2::Integration",
        paths: &[PropertyPath::new(&[Segment::Key("IntegrationUri")])],
    },
    DependentType {
        resource_type: "AWS::Events::Rule",
        paths: &[PropertyPath::new(&[Segment::Key("Targets"), Segment::Each, Segment::Key("Arn")])],
    },
    DependentType {
        resource_type: "AWS::Lambda::EventSourceMapping",
        paths: &[PropertyPath::new(&[Segment::Key("FunctionName")])],
    },
    DependentType {
        resource_type: "AWS::SNS::Subscription",
        paths: &[PropertyPath::new(&[Segment::Key("Endpoint")])],
    },
];

/// The role a resource plays in alias rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// An aliasable function
    Function,
    /// A published, immutable function version
    Version,
    /// A function alias
    Alias,
    /// A resource that may reference a function's identity
    Dependent(&'static DependentType),
    /// Anything else; never touched
    Other,
}

impl ResourceKind {
    /// Classify a resource by its type tag.
    pub fn of(resource: &Resource) -> Self {
        match resource.resource_type() {
            LAMBDA_FUNCTION_TYPE => Self::Function,
            LAMBDA_VERSION_TYPE => Self::Version,
            LAMBDA_ALIAS_TYPE => Self::Alias,
            other => dependent_type(other).map_or(Self::Other, Self::Dependent),
        }
    }
}

/// Look up the dependent-type table entry for a type tag.
pub fn dependent_type(resource_type: &str) -> Option<&'static DependentType> {
    DEPENDENT_TYPES.iter().find(|entry| entry.resource_type == resource_type)
}

/// Logical IDs of every aliasable function, in document order.
pub fn eligible_functions(graph: &ResourceGraph) -> Vec<&str> {
    graph
        .iter()
        .filter(|(_, resource)| ResourceKind::of(resource) == ResourceKind::Function)
        .map(|(id, _)| id)
        .collect()
}

/// Every dependent resource with its table entry, in document order.
pub fn dependent_resources(graph: &ResourceGraph) -> Vec<(&str, &'static DependentType)> {
    graph
        .iter()
        .filter_map(|(id, resource)| match ResourceKind::of(resource) {
            ResourceKind::Dependent(entry) => Some((id, entry)),
            _ => None,
        })
        .collect()
}

/// Logical IDs of the published versions of `function_id`, in document order.
///
/// A version belongs to a function when its `FunctionName` is a reference
/// (`Ref` or `Fn::GetAtt`) to that function.
pub fn published_versions<'a>(graph: &'a ResourceGraph, function_id: &str) -> Vec<&'a str> {
    graph
        .of_type(LAMBDA_VERSION_TYPE)
        .filter(|(_, version)| {
            version
                .property("FunctionName")
                .and_then(Reference::parse)
                .is_some_and(|reference| reference.logical_id == function_id)
        })
        .map(|(id, _)| id)
        .collect()
}
