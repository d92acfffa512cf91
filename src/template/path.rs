//! Static property paths into a resource's `Properties`.
//!
//! Paths are plain data so the set of reference-bearing fields can live in a
//! table instead of in traversal code. A path such as `Targets.*.Arn` is
//! written as `[Key("Targets"), Each, Key("Arn")]`.

use serde_json::{Map, Value};
use std::fmt;

/// One step of a [`PropertyPath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Descend into the named key of an object
    Key(&'static str),
    /// Descend into every element of an array
    Each,
}

/// A path from a resource's `Properties` object to zero or more values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyPath {
    segments: &'static [Segment],
}

impl PropertyPath {
    /// Create a path from its segments. The first segment must be a key.
    pub const fn new(segments: &'static [Segment]) -> Self {
        Self {
            segments,
        }
    }

    /// The segments of this path.
    pub const fn segments(&self) -> &'static [Segment] {
        self.segments
    }

    /// Call `visit` on every value this path reaches.
    ///
    /// Missing keys, and segments applied to values of the wrong shape, reach
    /// nothing.
    pub fn for_each_mut<F>(&self, properties: &mut Map<String, Value>, mut visit: F)
    where
        F: FnMut(&mut Value),
    {
        let Some((Segment::Key(first), rest)) = self.segments.split_first() else {
            return;
        };
        if let Some(value) = properties.get_mut(*first) {
            descend_mut(value, rest, &mut visit);
        }
    }

    /// Collect every value this path reaches.
    pub fn values<'a>(&self, properties: &'a Map<String, Value>) -> Vec<&'a Value> {
        let mut found = Vec::new();
        if let Some((Segment::Key(first), rest)) = self.segments.split_first() {
            if let Some(value) = properties.get(*first) {
                descend(value, rest, &mut found);
            }
        }
        found
    }
}

fn descend_mut<F>(value: &mut Value, segments: &[Segment], visit: &mut F)
where
    F: FnMut(&mut Value),
{
    match segments.split_first() {
        None => visit(value),
        Some((Segment::Key(key), rest)) => {
            if let Some(child) = value.as_object_mut().and_then(|object| object.get_mut(*key)) {
                descend_mut(child, rest, visit);
            }
        }
        Some((Segment::Each, rest)) => {
            if let Some(items) = value.as_array_mut() {
                for item in items {
                    descend_mut(item, rest, visit);
                }
            }
        }
    }
}

fn descend<'a>(value: &'a Value, segments: &[Segment], found: &mut Vec<&'a Value>) {
    match segments.split_first() {
        None => found.push(value),
        Some((Segment::Key(key), rest)) => {
            if let Some(child) = value.as_object().and_then(|object| object.get(*key)) {
                descend(child, rest, found);
            }
        }
        Some((Segment::Each, rest)) => {
            if let Some(items) = value.as_array() {
                for item in items {
                    descend(item, rest, found);
                }
            }
        }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                Segment::Key(key) => f.write_str(key)?,
                Segment::Each => f.write_str("*")?,
            }
        }
        Ok(())
    }
}
