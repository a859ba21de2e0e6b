//! Host data -> condition values.
//!
//! Scopes are built by the embedding application before evaluation. Values
//! follow one coercion table whichever route they take:
//!
//! | host            | value     |
//! |-----------------|-----------|
//! | string          | `String`  |
//! | integer         | `Integer` |
//! | boolean         | `Boolean` |
//! | map / record    | `Struct`  |
//!
//! Anything else found inside a map or record is left out of the resulting
//! [`Struct`].

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::{scope::Struct, value::Value};

/// Adapter from a host value to a [`Value`].
pub trait IntoValue {
    fn into_value(self) -> Value;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::String(self.to_string())
    }
}

impl IntoValue for i64 {
    fn into_value(self) -> Value {
        Value::Integer(self)
    }
}

impl IntoValue for i32 {
    fn into_value(self) -> Value {
        Value::Integer(i64::from(self))
    }
}

impl IntoValue for u32 {
    fn into_value(self) -> Value {
        Value::Integer(i64::from(self))
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Boolean(self)
    }
}

impl IntoValue for Struct {
    fn into_value(self) -> Value {
        Value::Struct(self)
    }
}

impl IntoValue for crate::value::Function {
    fn into_value(self) -> Value {
        Value::Function(self)
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::Array(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: IntoValue> IntoValue for HashMap<String, T> {
    fn into_value(self) -> Value {
        Value::Struct(self.into_iter().map(|(k, v)| (k, v.into_value())).collect())
    }
}

/// Errors converting host records into a [`Struct`].
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The host value serialized to something other than a map or record
    #[error("expected a record or map, got {0}")]
    NotARecord(&'static str),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Converts a JSON value using the coercion table.
///
/// Returns `None` for kinds outside the table (null, floats, arrays).
pub fn from_json(v: serde_json::Value) -> Option<Value> {
    match v {
        serde_json::Value::Bool(b) => Some(Value::Boolean(b)),
        serde_json::Value::Number(n) => n.as_i64().map(Value::Integer),
        serde_json::Value::String(s) => Some(Value::String(s)),
        serde_json::Value::Object(obj) => Some(Value::Struct(struct_from_json_object(obj))),
        serde_json::Value::Null | serde_json::Value::Array(_) => None,
    }
}

fn struct_from_json_object(obj: serde_json::Map<String, serde_json::Value>) -> Struct {
    obj.into_iter()
        .filter_map(|(k, v)| {
            let kind = json_kind(&v);
            match from_json(v) {
                Some(value) => Some((k, value)),
                None => {
                    log::debug!("omitting property {:?} of unsupported kind {}", k, kind);
                    None
                }
            }
        })
        .collect()
}

/// Converts a JSON object into a [`Struct`].
pub fn struct_from_json(v: serde_json::Value) -> Result<Struct, ConvertError> {
    match v {
        serde_json::Value::Object(obj) => Ok(struct_from_json_object(obj)),
        other => Err(ConvertError::NotARecord(json_kind(&other))),
    }
}

/// Converts any serializable host record or map into a [`Struct`].
///
/// Property names are the serialized field names. Rust field names are
/// already lower snake case; `#[serde(rename = "...")]` overrides them.
///
/// # Examples
///
/// ```
/// use conditional::convert::to_struct;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Build {
///     branch: String,
///     #[serde(rename = "pr")]
///     pull_request: bool,
/// }
///
/// let scope = to_struct(&Build { branch: "main".into(), pull_request: false }).unwrap();
/// assert!(scope.contains_key("branch"));
/// assert!(scope.contains_key("pr"));
/// ```
pub fn to_struct<T: Serialize + ?Sized>(record: &T) -> Result<Struct, ConvertError> {
    struct_from_json(serde_json::to_value(record)?)
}

/// Property name for a host field: the tag when given, else the field name
/// lower-cased.
///
/// For adapters that build a [`Struct`] by hand from records serde does not
/// describe. [`to_struct`] takes its names from serde instead, where field
/// names are already lower case and `#[serde(rename)]` plays the tag.
///
/// ```
/// use conditional::convert::normalize_field_name;
/// use conditional::{Struct, Value};
///
/// let fields = [("Branch", None, "main"), ("PullRequest", Some("pr"), "false")];
/// let record: Struct = fields
///     .into_iter()
///     .map(|(field, tag, v)| (normalize_field_name(field, tag), Value::from(v)))
///     .collect();
///
/// assert!(record.contains_key("branch"));
/// assert!(record.contains_key("pr"));
/// ```
pub fn normalize_field_name(field: &str, tag: Option<&str>) -> String {
    match tag {
        Some(tag) if !tag.is_empty() => tag.to_string(),
        _ => field.to_lowercase(),
    }
}

/// Builds a struct of environment variables, one string property per
/// variable.
pub fn env_struct<I, K, V>(vars: I) -> Struct
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    vars.into_iter()
        .map(|(k, v)| (k.into(), Value::String(v.into())))
        .collect()
}

impl Struct {
    /// Snapshot of the process environment. Variables whose name or value
    /// is not valid unicode are skipped.
    pub fn from_env() -> Self {
        env_struct(std::env::vars_os().filter_map(|(k, v)| {
            Some((k.into_string().ok()?, v.into_string().ok()?))
        }))
    }
}
