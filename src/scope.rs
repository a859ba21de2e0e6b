//! Name resolution for evaluation.
//!
//! A [`Struct`] is both the value kind for nested records and the usual
//! top-level scope. Resolution is flat: a bare identifier is looked up in
//! the scope given to the evaluator and nowhere else. Nested data is only
//! reachable through `.` chains.

use std::{
    collections::{HashMap, hash_map},
    fmt,
};

use crate::{convert::IntoValue, value::Value};

/// Anything identifiers can be resolved against.
///
/// Implementations shared between threads must be safe for concurrent
/// reads; the evaluator takes no locks.
pub trait Scope {
    fn get(&self, name: &str) -> Option<&Value>;
}

/// A set of uniquely named properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Struct {
    props: HashMap<String, Value>,
}

impl Struct {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, replacing any previous value with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl IntoValue) {
        self.props.insert(name.into(), value.into_value());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl IntoValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.props.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.props.remove(name)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.props.iter()
    }
}

impl Scope for Struct {
    fn get(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }
}

impl Scope for HashMap<String, Value> {
    fn get(&self, name: &str) -> Option<&Value> {
        HashMap::get(self, name)
    }
}

impl FromIterator<(String, Value)> for Struct {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Struct {
            props: iter.into_iter().collect(),
        }
    }
}

impl From<HashMap<String, Value>> for Struct {
    fn from(props: HashMap<String, Value>) -> Self {
        Struct { props }
    }
}

impl IntoIterator for Struct {
    type Item = (String, Value);
    type IntoIter = hash_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.props.into_iter()
    }
}

impl<'a> IntoIterator for &'a Struct {
    type Item = (&'a String, &'a Value);
    type IntoIter = hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.props.iter()
    }
}

/// Renders as `{name: value, ...}` with keys sorted.
impl fmt::Display for Struct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.props.keys().collect();
        keys.sort();

        f.write_str("{")?;
        for (i, key) in keys.into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, self.props[key])?;
        }
        f.write_str("}")
    }
}
