//! Intrinsic reference expressions.
//!
//! CloudFormation expresses "the identity of resource X" as a single-key object:
//!
//! ```json
//! { "Ref": "WebLambdaFunction" }
//! { "Fn::GetAtt": ["WebLambdaFunction", "Arn"] }
//! { "Fn::GetAtt": "WebLambdaFunction.Arn" }
//! ```
//!
//! The discriminator is the object shape, never a bare string: a string that
//! happens to equal a logical ID is not a reference. Everything in this module
//! is pure.

use serde_json::{Map, Value};

use crate::core::SahError;

/// Discriminator key of a plain reference.
pub const REF_KEY: &str = "Ref";

/// Discriminator key of an attribute reference.
pub const GET_ATT_KEY: &str = "Fn::GetAtt";

/// A parsed reference to a resource, optionally to one of its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    /// Logical ID of the referenced resource
    pub logical_id: String,
    /// Attribute name for `Fn::GetAtt`; `None` for `Ref`
    pub attribute: Option<String>,
}

impl Reference {
    /// A `Ref` to `logical_id`.
    pub fn to(logical_id: impl Into<String>) -> Self {
        Self {
            logical_id: logical_id.into(),
            attribute: None,
        }
    }

    /// A `Fn::GetAtt` of `attribute` on `logical_id`.
    pub fn get_att(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            logical_id: logical_id.into(),
            attribute: Some(attribute.into()),
        }
    }

    /// Parse a reference expression, returning `None` for any other value.
    pub fn parse(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        if object.len() != 1 {
            return None;
        }
        let (key, inner) = object.iter().next()?;

        let reference = match key.as_str() {
            REF_KEY => Self::to(inner.as_str()?),
            GET_ATT_KEY => match inner {
                Value::Array(parts) => match parts.as_slice() {
                    [Value::String(logical_id), Value::String(attribute)] => {
                        Self::get_att(logical_id.as_str(), attribute.as_str())
                    }
                    _ => return None,
                },
                // Logical IDs are alphanumeric, so the first dot ends the ID
                Value::String(dotted) => {
                    let (logical_id, attribute) = dotted.split_once('.')?;
                    Self::get_att(logical_id, attribute)
                }
                _ => return None,
            },
            _ => return None,
        };

        if reference.logical_id.is_empty()
            || reference.attribute.as_deref().is_some_and(str::is_empty)
        {
            return None;
        }
        Some(reference)
    }

    /// Render this reference in the canonical shape expected by CloudFormation.
    pub fn to_value(&self) -> Value {
        make_reference(&self.logical_id, self.attribute.as_deref())
    }

    /// Render this reference in the same shape as `original`.
    ///
    /// A dotted `{"Fn::GetAtt": "Id.Attr"}` stays dotted; anything else gets
    /// the canonical shape of [`Reference::to_value`].
    pub fn to_value_like(&self, original: &Value) -> Value {
        let dotted = original.get(GET_ATT_KEY).is_some_and(Value::is_string);
        match self.attribute.as_deref() {
            Some(attribute) if dotted => {
                let mut object = Map::with_capacity(1);
                object.insert(
                    GET_ATT_KEY.to_string(),
                    Value::String(format!("{}.{attribute}", self.logical_id)),
                );
                Value::Object(object)
            }
            _ => self.to_value(),
        }
    }
}

impl TryFrom<&Value> for Reference {
    type Error = SahError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        read_reference(value)
    }
}

impl From<&Reference> for Value {
    fn from(reference: &Reference) -> Self {
        reference.to_value()
    }
}

/// Whether `value` has the shape of a reference expression.
pub fn is_reference(value: &Value) -> bool {
    Reference::parse(value).is_some()
}

/// Build a reference expression.
///
/// Without an attribute this is `{"Ref": id}`; with one it is the array form
/// `{"Fn::GetAtt": [id, attribute]}`.
pub fn make_reference(logical_id: &str, attribute: Option<&str>) -> Value {
    let mut object = Map::with_capacity(1);
    match attribute {
        None => {
            object.insert(REF_KEY.to_string(), Value::String(logical_id.to_string()));
        }
        Some(attribute) => {
            object.insert(
                GET_ATT_KEY.to_string(),
                Value::Array(vec![
                    Value::String(logical_id.to_string()),
                    Value::String(attribute.to_string()),
                ]),
            );
        }
    }
    Value::Object(object)
}

/// Read a value that is required to be a reference expression.
///
/// # Errors
///
/// Returns [`SahError::MalformedReference`] if `value` is not a reference.
pub fn read_reference(value: &Value) -> Result<Reference, SahError> {
    Reference::parse(value).ok_or_else(|| SahError::MalformedReference {
        value: value.to_string(),
    })
}
