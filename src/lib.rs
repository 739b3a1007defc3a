//! MFL language core
//!
//! MFL is a small expression-oriented functional language. This crate holds
//! its core: a tree-walking evaluator with first-class closures and ordered
//! pattern matching, and an Algorithm-W type checker with let-polymorphism.
//! Both consume an already-built [`ast::Expr`] (or [`ast::Program`]); lexing
//! and parsing live outside the crate.
//!
//! ```
//! use mfl::ast::{BinaryOp, Expr};
//! use mfl::interpreter::{evaluate, Environment, Value};
//! use mfl::typechecker::{infer_type, TypeEnv};
//!
//! // (fn x -> x + 1)(41)
//! let expr = Expr::apply(
//!     Expr::lambda("x", Expr::binary(BinaryOp::Add, Expr::var("x"), Expr::int(1))),
//!     Expr::int(41),
//! );
//! assert_eq!(infer_type(&expr, &TypeEnv::new()).unwrap().to_string(), "int");
//! assert_eq!(evaluate(&expr, &Environment::new()).unwrap(), Value::Int(42));
//! ```
//!
//! # Recursion depth
//!
//! Evaluation is direct recursion on the host stack with no tail-call
//! elimination. Depth grows with the nesting of the AST and with the number
//! of closure applications in progress. The evaluator counts the latter and
//! fails with [`interpreter::EvalError::DepthExceeded`] once
//! [`config::Config::max_call_depth`] is reached; very deeply nested trees
//! can still exhaust the stack.
//!
//! The default limit fits the 2 MB stack that `std::thread::spawn` gives a
//! thread, in an unoptimized build. A caller that raises the limit must also
//! run evaluation on a thread with a proportionally larger stack (see
//! [`std::thread::Builder::stack_size`]).

pub mod ast;
pub mod config;
pub mod desugar;
pub mod diagnostics;
pub mod interpreter;
pub mod scope;
pub mod typechecker;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::Config;
    pub use crate::diagnostics::{Diagnostic, Severity};
    pub use crate::interpreter::{evaluate, evaluate_program, Environment, EvalError, Value};
    pub use crate::typechecker::{infer_program, infer_type, Type, TypeEnv, TypeError};
}
