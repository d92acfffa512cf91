//! Compiled CloudFormation template model.
//!
//! A [`Template`] is the document produced by the deployment tool's compiler:
//! a JSON object whose `Resources` member maps logical IDs to typed resources.
//! Only `Resources` is modeled; every other member (`AWSTemplateFormatVersion`,
//! `Outputs`, ...) is carried through untouched.
//!
//! Key order is significant for reproducible output. Resources are held in an
//! [`IndexMap`] in document order, and each resource keeps its own JSON object
//! so that serializing an unmodified template reproduces the input exactly.
//!
//! # Example
//!
//! ```rust
//! use sah_cli::template::Template;
//!
//! let template = Template::from_json_str(r#"{
//!   "AWSTemplateFormatVersion": "2010-09-09",
//!   "Resources": {
//!     "WebLambdaFunction": { "Type": "AWS::Lambda::Function", "Properties": {} }
//!   }
//! }"#)?;
//!
//! assert_eq!(template.resources().len(), 1);
//! assert_eq!(
//!     template.resources().get("WebLambdaFunction").unwrap().resource_type(),
//!     "AWS::Lambda::Function"
//! );
//! # Ok::<(), sah_cli::core::SahError>(())
//! ```

pub mod path;
pub mod reference;

pub use path::{PropertyPath, Segment};
pub use reference::{Reference, is_reference, make_reference, read_reference};

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::core::SahError;

/// Template member holding the resource map.
pub const RESOURCES_KEY: &str = "Resources";
const TYPE_KEY: &str = "Type";
const PROPERTIES_KEY: &str = "Properties";
const DEPENDS_ON_KEY: &str = "DependsOn";

/// A single resource declaration.
///
/// The declaration is stored as its JSON object; accessors expose the parts
/// the rewrite engine needs (`Type`, `Properties`, `DependsOn`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Resource {
    body: Map<String, Value>,
}

impl Resource {
    /// Create an empty declaration of the given type.
    pub fn new(resource_type: impl Into<String>) -> Self {
        let mut body = Map::new();
        body.insert(TYPE_KEY.to_string(), Value::String(resource_type.into()));
        Self {
            body,
        }
    }

    /// Validate and wrap a JSON resource declaration.
    ///
    /// # Errors
    ///
    /// Returns [`SahError::InvalidTemplate`] unless `value` is an object with a
    /// string `Type`.
    pub fn from_value(logical_id: &str, value: Value) -> Result<Self, SahError> {
        let Value::Object(body) = value else {
            return Err(SahError::InvalidTemplate {
                reason: format!("resource '{logical_id}' is not an object"),
            });
        };
        if !body.get(TYPE_KEY).is_some_and(Value::is_string) {
            return Err(SahError::InvalidTemplate {
                reason: format!("resource '{logical_id}' has no string Type"),
            });
        }
        Ok(Self {
            body,
        })
    }

    /// The resource's type tag, e.g. `AWS::Lambda::Function`.
    pub fn resource_type(&self) -> &str {
        self.body.get(TYPE_KEY).and_then(Value::as_str).unwrap_or_default()
    }

    /// The `Properties` object, if present.
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.body.get(PROPERTIES_KEY).and_then(Value::as_object)
    }

    /// Mutable access to the `Properties` object, if present.
    pub fn properties_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.body.get_mut(PROPERTIES_KEY).and_then(Value::as_object_mut)
    }

    /// A single property value.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties().and_then(|properties| properties.get(name))
    }

    /// Set a property, creating `Properties` if needed.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        let properties = self
            .body
            .entry(PROPERTIES_KEY)
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(properties) = properties {
            properties.insert(name.into(), value);
        }
        self
    }

    /// Logical IDs listed in `DependsOn`, which may be a string or a list.
    pub fn depends_on(&self) -> Vec<&str> {
        match self.body.get(DEPENDS_ON_KEY) {
            Some(Value::String(id)) => vec![id.as_str()],
            Some(Value::Array(ids)) => ids.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Replace `DependsOn` with the given list.
    #[must_use]
    pub fn with_depends_on<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids = ids.into_iter().map(|id| Value::String(id.into())).collect();
        self.body.insert(DEPENDS_ON_KEY.to_string(), Value::Array(ids));
        self
    }

    /// The raw declaration.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.body
    }
}

/// Ordered map of logical ID to resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResourceGraph {
    resources: IndexMap<String, Resource>,
}

impl ResourceGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from the `Resources` object of a template.
    ///
    /// # Errors
    ///
    /// Returns [`SahError::InvalidTemplate`] if any declaration is malformed.
    pub fn from_map(map: Map<String, Value>) -> Result<Self, SahError> {
        let resources = map
            .into_iter()
            .map(|(logical_id, value)| {
                let resource = Resource::from_value(&logical_id, value)?;
                Ok((logical_id, resource))
            })
            .collect::<Result<IndexMap<_, _>, SahError>>()?;
        Ok(Self {
            resources,
        })
    }

    /// Look up a resource by logical ID.
    pub fn get(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.get(logical_id)
    }

    /// Mutable lookup by logical ID.
    pub fn get_mut(&mut self, logical_id: &str) -> Option<&mut Resource> {
        self.resources.get_mut(logical_id)
    }

    /// Whether a logical ID is taken.
    pub fn contains(&self, logical_id: &str) -> bool {
        self.resources.contains_key(logical_id)
    }

    /// Add a new resource at the end of the graph.
    ///
    /// # Errors
    ///
    /// Returns [`SahError::DuplicateLogicalId`] if the ID is already taken;
    /// the existing resource is left in place.
    pub fn insert_new(
        &mut self,
        logical_id: impl Into<String>,
        resource: Resource,
    ) -> Result<(), SahError> {
        let logical_id = logical_id.into();
        if self.resources.contains_key(&logical_id) {
            return Err(SahError::DuplicateLogicalId {
                logical_id,
            });
        }
        self.resources.insert(logical_id, resource);
        Ok(())
    }

    /// Iterate over `(logical_id, resource)` in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Resource)> {
        self.resources.iter().map(|(id, resource)| (id.as_str(), resource))
    }

    /// Resources of one type, in document order.
    pub fn of_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a Resource)> + 'a {
        self.iter().filter(move |(_, resource)| resource.resource_type() == resource_type)
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the graph has no resources.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// A compiled template document.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    // `Resources` keeps its slot here (as null) so serialization preserves key order
    document: Map<String, Value>,
    resources: ResourceGraph,
}

impl Template {
    /// Wrap a parsed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SahError::InvalidTemplate`] if the document is not an object,
    /// has no `Resources` object, or contains a malformed resource.
    pub fn from_value(value: Value) -> Result<Self, SahError> {
        let Value::Object(mut document) = value else {
            return Err(SahError::InvalidTemplate {
                reason: "template is not a JSON object".to_string(),
            });
        };
        let resources = match document.get_mut(RESOURCES_KEY).map(Value::take) {
            Some(Value::Object(map)) => ResourceGraph::from_map(map)?,
            Some(_) => {
                return Err(SahError::InvalidTemplate {
                    reason: "Resources is not an object".to_string(),
                });
            }
            None => {
                return Err(SahError::InvalidTemplate {
                    reason: "template has no Resources section".to_string(),
                });
            }
        };
        Ok(Self {
            document,
            resources,
        })
    }

    /// Parse a template from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SahError::JsonError`] for invalid JSON, otherwise as
    /// [`Template::from_value`].
    pub fn from_json_str(text: &str) -> Result<Self, SahError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// The resource graph.
    pub fn resources(&self) -> &ResourceGraph {
        &self.resources
    }

    /// Mutable access to the resource graph.
    pub fn resources_mut(&mut self) -> &mut ResourceGraph {
        &mut self.resources
    }

    /// Serialize as pretty-printed JSON with 2-space indentation.
    ///
    /// # Errors
    ///
    /// Returns [`SahError::JsonError`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, SahError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Convert back into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`SahError::JsonError`] if serialization fails.
    pub fn to_value(&self) -> Result<Value, SahError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.document.len()))?;
        for (key, value) in &self.document {
            if key == RESOURCES_KEY {
                map.serialize_entry(key, &self.resources)?;
            } else {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Template {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}
