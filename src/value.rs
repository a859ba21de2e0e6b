use std::{fmt, sync::Arc};

use regex::Regex;

use crate::scope::Struct;

/// Signature of a host-supplied callable.
pub type NativeFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A callable supplied by the embedding application.
///
/// Conditions cannot define functions; they can only invoke the ones placed
/// in the scope. Two `Function`s are equal only if they share the same
/// underlying closure.
#[derive(Clone)]
pub struct Function(Arc<NativeFn>);

impl Function {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Function(Arc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Function")
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A runtime value of the condition language.
///
/// The set of kinds is closed. Failures are values too: every operator that
/// cannot handle its operands returns [`Value::Error`] instead of panicking,
/// and callers must check for it before trusting a result.
///
/// # Examples
///
/// ```
/// use conditional::{Struct, Value};
///
/// let branch = Value::String("main".to_string());
/// assert!(branch.is_truthy());
///
/// let mut build = Struct::new();
/// build.insert("branch", branch);
/// let scope = Value::Struct(build);
/// assert_eq!(scope.type_name(), "STRUCT");
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    Null,

    Boolean(bool),

    /// 64-bit signed integer
    Integer(i64),

    /// UTF-8 string
    String(String),

    /// Compiled regular expression. The source text is kept by the regex.
    Regexp(Regex),

    /// Ordered sequence of values
    Array(Vec<Value>),

    /// Named properties. Also the runtime shape of a scope.
    Struct(Struct),

    /// Host callable
    Function(Function),

    /// Evaluation failure, carried through the same channel as results
    Error(String),
}

impl Value {
    pub fn error(message: impl Into<String>) -> Self {
        Value::Error(message.into())
    }

    /// Only `null` and `false` are falsy. Zero and the empty string are
    /// truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Upper-case kind name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Boolean(_) => "BOOLEAN",
            Value::Integer(_) => "INTEGER",
            Value::String(_) => "STRING",
            Value::Regexp(_) => "REGEXP",
            Value::Array(_) => "ARRAY",
            Value::Struct(_) => "STRUCT",
            Value::Function(_) => "FUNCTION",
            Value::Error(_) => "ERROR",
        }
    }

    /// Typed accessors for host functions reading their arguments.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Values of different kinds are never equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Regexp(a), Value::Regexp(b)) => a.as_str() == b.as_str(),
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Struct(a), Value::Struct(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Regexp(re) => write!(f, "/{}/", re.as_str()),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Struct(props) => write!(f, "{}", props),
            Value::Function(_) => write!(f, "function"),
            Value::Error(msg) => write!(f, "ERROR: {}", msg),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Struct> for Value {
    fn from(s: Struct) -> Self {
        Value::Struct(s)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}
