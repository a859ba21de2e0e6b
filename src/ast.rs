//! # Condition Language - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for the condition
//! language, a small predicate language used to decide whether a pipeline
//! step should run.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (literals, identifiers, operations, calls)
//! - **[operators]** - Prefix and binary operators with their precedence
//!
//! ## Quick Start
//!
//! ```text
//! build.branch == "main" && !build.pull_request
//! ```
//!
//! ## Core Concepts
//!
//! A source string holds exactly one expression. There are no statements,
//! assignments or loops; the only callables are functions supplied by the
//! host through the scope.
//!
//! ### Operators
//!
//! From loosest to tightest binding:
//!
//! - `||`
//! - `&&`
//! - `==`, `!=`, `=~`, `!~`, `@>`
//! - prefix `!` and `-`
//! - `.` member access and `name(...)` calls
//!
//! ### Rendering
//!
//! Every node renders to a canonical, fully parenthesized form:
//!
//! ```text
//! a || b && c            =>  (a || (b && c))
//! foo.bar.baz == true    =>  (((foo.bar).baz) == true)
//! ```
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::Expr;
pub use operators::{BinOp, Precedence, UnaryOp};
pub use tokens::Token;
