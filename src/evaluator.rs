use std::cell::Cell;

use regex::Regex;
use thiserror::Error;

use crate::{
    ast::{BinOp, Expr, UnaryOp},
    scope::Scope,
    parser::MAX_DEPTH,
    value::{Function, Value},
};

/// Deepest tree the evaluator walks. Parsed trees stay within
/// [`MAX_DEPTH`]; the extra room is for trees built by hand.
pub const MAX_EVAL_DEPTH: usize = 2 * MAX_DEPTH;

/// Failures during evaluation.
///
/// These never escape [`evaluate`]: they are turned into [`Value::Error`]
/// carrying the rendered message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Bare name missing from the scope
    #[error("identifier not found: {0}")]
    UndefinedIdentifier(String),

    /// `.` access to a property the struct does not have
    #[error("struct has no property \"{0}\"")]
    MissingProperty(String),

    /// Call of a name bound to something other than a function
    #[error("not a function: {0}")]
    NotAFunction(String),

    /// Operand of the wrong kind
    #[error("{0}")]
    TypeError(String),

    /// Prefix operator applied to an unsupported kind
    #[error("unknown operator: {op}{kind}")]
    UnknownOperator { op: UnaryOp, kind: &'static str },

    #[error("invalid regexp /{pattern}/: {message}")]
    InvalidRegexp { pattern: String, message: String },

    #[error("expression nesting exceeds maximum depth of {0}")]
    TooDeep(usize),

    #[error("integer overflow: -{0}")]
    Overflow(i64),

    /// Error value produced by a host function or stored in the scope
    #[error("{0}")]
    Raised(String),
}

impl From<EvalError> for Value {
    fn from(e: EvalError) -> Self {
        Value::Error(e.to_string())
    }
}

/// Turns an error value coming from outside the evaluator into an `Err`.
fn raise(value: Value) -> Result<Value, EvalError> {
    match value {
        Value::Error(msg) => Err(EvalError::Raised(msg)),
        v => Ok(v),
    }
}

fn expected(kind: &str, side: &str, op: BinOp, found: &Value) -> EvalError {
    EvalError::TypeError(format!(
        "expected {} on {} side of {}, got {}",
        kind,
        side,
        op,
        found.type_name()
    ))
}

/// Tree-walking evaluator bound to a scope.
///
/// The only state is the current depth, so one tree can be evaluated from
/// many threads at once, each with its own evaluator, as long as the scope
/// allows concurrent reads.
pub struct Evaluator<'s, S: Scope + ?Sized> {
    scope: &'s S,
    depth: Cell<usize>,
}

impl<'s, S: Scope + ?Sized> Evaluator<'s, S> {
    pub fn new(scope: &'s S) -> Self {
        Evaluator {
            scope,
            depth: Cell::new(0),
        }
    }

    /// Evaluates `expr`, stopping at the first failing subexpression.
    pub fn eval_expr(&self, expr: &Expr) -> Result<Value, EvalError> {
        let depth = self.depth.get();
        if depth >= MAX_EVAL_DEPTH {
            return Err(EvalError::TooDeep(MAX_EVAL_DEPTH));
        }

        self.depth.set(depth + 1);
        let result = self.eval_node(expr);
        self.depth.set(depth);
        result
    }

    fn eval_node(&self, expr: &Expr) -> Result<Value, EvalError> {
        match expr {
            Expr::Integer(n) => Ok(Value::Integer(*n)),
            Expr::String(s) => Ok(Value::String(s.clone())),
            Expr::Boolean(b) => Ok(Value::Boolean(*b)),
            Expr::Regexp(pattern) => Regex::new(pattern)
                .map(Value::Regexp)
                .map_err(|e| EvalError::InvalidRegexp {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                }),
            Expr::Identifier(name) => self.lookup(name),
            Expr::Array(elements) => elements
                .iter()
                .map(|e| self.eval_expr(e))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Expr::Prefix { op, right } => {
                let operand = self.eval_expr(right)?;
                self.apply_prefix(*op, operand)
            }
            Expr::Infix { op, left, right } => self.eval_infix(*op, left, right),
            Expr::Call { function, args } => self.eval_call(function, args),
        }
    }

    fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        match self.scope.get(name) {
            Some(value) => raise(value.clone()),
            None => Err(EvalError::UndefinedIdentifier(name.to_string())),
        }
    }

    fn apply_prefix(&self, op: UnaryOp, operand: Value) -> Result<Value, EvalError> {
        match (op, operand) {
            (UnaryOp::Not, v) => Ok(Value::Boolean(!v.is_truthy())),
            (UnaryOp::Negate, Value::Integer(n)) => n
                .checked_neg()
                .map(Value::Integer)
                .ok_or(EvalError::Overflow(n)),
            (UnaryOp::Negate, v) => Err(EvalError::UnknownOperator {
                op,
                kind: v.type_name(),
            }),
        }
    }

    fn eval_infix(&self, op: BinOp, left: &Expr, right: &Expr) -> Result<Value, EvalError> {
        let left_val = self.eval_expr(left)?;

        match op {
            BinOp::And => {
                if !left_val.is_truthy() {
                    return Ok(Value::Boolean(false));
                }
                Ok(Value::Boolean(self.eval_expr(right)?.is_truthy()))
            }
            BinOp::Or => {
                if left_val.is_truthy() {
                    return Ok(Value::Boolean(true));
                }
                Ok(Value::Boolean(self.eval_expr(right)?.is_truthy()))
            }
            BinOp::Equal => Ok(Value::Boolean(left_val == self.eval_expr(right)?)),
            BinOp::NotEqual => Ok(Value::Boolean(left_val != self.eval_expr(right)?)),
            BinOp::Match | BinOp::NotMatch => {
                let subject = match &left_val {
                    Value::String(s) => s,
                    other => return Err(expected("STRING", "left", op, other)),
                };
                let matched = match self.eval_expr(right)? {
                    Value::Regexp(re) => re.is_match(subject),
                    other => return Err(expected("REGEXP", "right", op, &other)),
                };
                Ok(Value::Boolean(matched == (op == BinOp::Match)))
            }
            BinOp::Contains => {
                let items = match &left_val {
                    Value::Array(items) => items,
                    other => return Err(expected("ARRAY", "left", op, other)),
                };
                let needle = self.eval_expr(right)?;
                Ok(Value::Boolean(items.iter().any(|item| *item == needle)))
            }
            BinOp::Dot => {
                let props = match &left_val {
                    Value::Struct(props) => props,
                    other => return Err(expected("STRUCT", "left", op, other)),
                };
                let name = match right {
                    Expr::Identifier(name) => name,
                    other => {
                        return Err(EvalError::TypeError(format!(
                            "expected identifier on right side of ., got {}",
                            other
                        )));
                    }
                };
                match props.get(name) {
                    Some(value) => raise(value.clone()),
                    None => Err(EvalError::MissingProperty(name.clone())),
                }
            }
        }
    }

    fn eval_call(&self, name: &str, args: &[Expr]) -> Result<Value, EvalError> {
        let function: Function = match self.lookup(name)? {
            Value::Function(f) => f,
            _ => return Err(EvalError::NotAFunction(name.to_string())),
        };

        let args = args
            .iter()
            .map(|arg| self.eval_expr(arg))
            .collect::<Result<Vec<_>, _>>()?;

        log::trace!("calling {} with {} argument(s)", name, args.len());
        raise(function.call(&args))
    }
}

/// Evaluates a parsed condition against a scope.
///
/// Always returns exactly one value. Failures come back as
/// [`Value::Error`]; check [`Value::is_error`] before using the result.
///
/// # Examples
///
/// ```
/// use conditional::{Struct, Value, evaluate, parse};
///
/// let scope = Struct::new().with("build", Struct::new().with("branch", "main"));
/// let expr = parse("build.branch == 'main'").unwrap();
/// assert_eq!(evaluate(&expr, &scope), Value::Boolean(true));
///
/// let expr = parse("build.tag == 'v1'").unwrap();
/// assert_eq!(
///     evaluate(&expr, &scope),
///     Value::Error("struct has no property \"tag\"".to_string())
/// );
/// ```
pub fn evaluate<S: Scope + ?Sized>(expr: &Expr, scope: &S) -> Value {
    Evaluator::new(scope)
        .eval_expr(expr)
        .unwrap_or_else(Value::from)
}
