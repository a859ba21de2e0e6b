//! Condition expressions for deciding whether a pipeline step runs.
//!
//! ```
//! use conditional::{Struct, Value, evaluate, parse};
//!
//! let scope = Struct::new().with("build", Struct::new().with("branch", "main"));
//! let expr = parse(r#"build.branch == "main" && !(build.branch =~ /^release-/)"#).unwrap();
//! assert_eq!(evaluate(&expr, &scope), Value::Boolean(true));
//! ```
pub mod ast;
pub mod cli;
pub mod convert;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod scope;
pub mod value;

pub use ast::{BinOp, Expr, Token, UnaryOp};
pub use convert::{ConvertError, IntoValue};
pub use evaluator::{EvalError, Evaluator, evaluate};
pub use lexer::Lexer;
pub use parser::Parser;
pub use scope::{Scope, Struct};
pub use value::{Function, Value};

/// Parses `source` into a tree, or returns every syntax error found.
pub fn parse(source: &str) -> Result<Expr, Vec<String>> {
    let mut parser = Parser::new(Lexer::new(source));
    let expr = parser.parse();

    match expr {
        Some(expr) if parser.errors().is_empty() => Ok(expr),
        _ => {
            let mut errors = parser.errors().to_vec();
            if errors.is_empty() {
                errors.push("no expression found".to_string());
            }
            Err(errors)
        }
    }
}
