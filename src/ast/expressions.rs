use std::fmt;

use crate::ast::{BinOp, UnaryOp};

/// Abstract Syntax Tree node representing a parsed condition.
///
/// A tree is built once per input string and never mutated afterwards, so
/// the same tree can be evaluated against any number of scopes.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // Literals
    /// Literal integer
    ///
    /// # Example
    /// ```text
    /// 42
    /// ```
    Integer(i64),

    /// String literal
    ///
    /// # Example
    /// ```text
    /// "main"
    /// ```
    String(String),

    /// Boolean literal
    Boolean(bool),

    /// Regular expression literal, holding the uncompiled pattern text
    ///
    /// # Example
    /// ```text
    /// /^release-/
    /// ```
    Regexp(String),

    // References
    /// Bare name resolved against the scope, or a property name on the
    /// right-hand side of `.`
    Identifier(String),

    // Operations
    /// Prefix operation (`!x`, `-x`)
    Prefix { op: UnaryOp, right: Box<Expr> },

    /// Binary operation (comparison, logical, member access)
    ///
    /// # Examples
    /// ```text
    /// build.branch == "main"
    /// build.tag =~ /^v/
    /// ```
    Infix {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Host function call
    ///
    /// # Example
    /// ```text
    /// env("CI")
    /// ```
    Call { function: String, args: Vec<Expr> },

    /// Array literal
    ///
    /// # Example
    /// ```text
    /// ["llamas", "alpacas"]
    /// ```
    Array(Vec<Expr>),
}

impl Expr {
    pub fn prefix(op: UnaryOp, right: Expr) -> Self {
        Expr::Prefix {
            op,
            right: Box::new(right),
        }
    }

    pub fn infix(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::Infix {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Canonical, fully parenthesized rendering. Parsing the rendered text
/// yields an equal tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Integer(n) => write!(f, "{}", n),
            Expr::String(s) if s.contains('"') => write!(f, "'{}'", s),
            Expr::String(s) => write!(f, "\"{}\"", s),
            Expr::Boolean(b) => write!(f, "{}", b),
            Expr::Regexp(pattern) => write!(f, "/{}/", pattern),
            Expr::Identifier(name) => f.write_str(name),
            Expr::Prefix { op, right } => write!(f, "({}{})", op, right),
            Expr::Infix {
                op: BinOp::Dot,
                left,
                right,
            } => write!(f, "({}.{})", left, right),
            Expr::Infix { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Expr::Call { function, args } => {
                write!(f, "{}(", function)?;
                write_list(f, args)?;
                f.write_str(")")
            }
            Expr::Array(elements) => {
                f.write_str("[")?;
                write_list(f, elements)?;
                f.write_str("]")
            }
        }
    }
}
