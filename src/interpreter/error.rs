//! Runtime error types for the MFL interpreter.
//!
//! Every variant carries the source line of the node that failed. Errors are
//! fail-fast: the interpreter never recovers from one, it propagates it to
//! the driver with `?`.

use thiserror::Error;

use crate::ast::Line;
use crate::diagnostics::runtime;

/// Failure raised while evaluating
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("line {line}: undefined variable: {name}")]
    UndefinedName { name: String, line: Line },

    #[error("line {line}: cannot apply a value of kind {found}: not a function")]
    NotAFunction { found: &'static str, line: Line },

    #[error("line {line}: condition must evaluate to a bool, got {found}")]
    NotABoolean { found: &'static str, line: Line },

    #[error("line {line}: type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        line: Line,
    },

    #[error("line {line}: fold requires a binary (curried) function")]
    FoldRequiresBinaryFunction { line: Line },

    #[error("line {line}: substr range [{start}, {start}+{len}) out of bounds for string of length {length}")]
    RangeError {
        start: i64,
        len: i64,
        length: usize,
        line: Line,
    },

    #[error("line {line}: index {index} out of bounds for tuple of arity {arity}")]
    IndexOutOfBounds {
        index: usize,
        arity: usize,
        line: Line,
    },

    #[error("line {line}: expected a tuple of arity {expected}, got arity {found}")]
    ArityError {
        expected: usize,
        found: usize,
        line: Line,
    },

    #[error("line {line}: tuple literal requires at least 2 elements, got {found}")]
    TupleArity { found: usize, line: Line },

    #[error("line {line}: non exhaustive match expression")]
    NonExhaustiveMatch { line: Line },

    #[error("line {line}: division by zero")]
    DivisionByZero { line: Line },

    #[error("line {line}: {op} of an empty list")]
    EmptyList { op: &'static str, line: Line },

    #[error("line {line}: call depth limit of {limit} exceeded")]
    DepthExceeded { limit: usize, line: Line },

    #[error("program has no items")]
    EmptyProgram,
}

impl EvalError {
    /// Stable error code (E4xxx series)
    pub fn code(&self) -> &'static str {
        match self {
            EvalError::UndefinedName { .. } => runtime::UNDEFINED_VARIABLE,
            EvalError::NotAFunction { .. } => runtime::NOT_CALLABLE,
            EvalError::NotABoolean { .. } => runtime::NOT_A_BOOLEAN,
            EvalError::TypeMismatch { .. } => runtime::TYPE_MISMATCH,
            EvalError::FoldRequiresBinaryFunction { .. } => runtime::NOT_A_BINARY_FUNCTION,
            EvalError::RangeError { .. } => runtime::RANGE_ERROR,
            EvalError::IndexOutOfBounds { .. } => runtime::INDEX_OUT_OF_BOUNDS,
            EvalError::ArityError { .. } => runtime::WRONG_ARITY,
            EvalError::TupleArity { .. } => runtime::TUPLE_TOO_SHORT,
            EvalError::NonExhaustiveMatch { .. } => runtime::NON_EXHAUSTIVE_MATCH,
            EvalError::DivisionByZero { .. } => runtime::DIVISION_BY_ZERO,
            EvalError::EmptyList { .. } => runtime::EMPTY_LIST,
            EvalError::DepthExceeded { .. } => runtime::STACK_OVERFLOW,
            EvalError::EmptyProgram => runtime::EMPTY_PROGRAM,
        }
    }

    /// Source line of the failing node; 0 when no node is involved
    pub fn line(&self) -> Line {
        match self {
            EvalError::UndefinedName { line, .. }
            | EvalError::NotAFunction { line, .. }
            | EvalError::NotABoolean { line, .. }
            | EvalError::TypeMismatch { line, .. }
            | EvalError::FoldRequiresBinaryFunction { line }
            | EvalError::RangeError { line, .. }
            | EvalError::IndexOutOfBounds { line, .. }
            | EvalError::ArityError { line, .. }
            | EvalError::TupleArity { line, .. }
            | EvalError::NonExhaustiveMatch { line }
            | EvalError::DivisionByZero { line }
            | EvalError::EmptyList { line, .. }
            | EvalError::DepthExceeded { line, .. } => *line,
            EvalError::EmptyProgram => 0,
        }
    }

    pub(crate) fn mismatch(expected: &'static str, found: &super::Value, line: Line) -> Self {
        EvalError::TypeMismatch {
            expected,
            found: found.kind_name(),
            line,
        }
    }
}

impl miette::Diagnostic for EvalError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(EvalError::code(self)))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        match self {
            EvalError::DepthExceeded { .. } => Some(Box::new(
                "evaluation recurses on the host stack; raise `max_call_depth` or restructure the recursion",
            )),
            EvalError::NonExhaustiveMatch { .. } => {
                Some(Box::new("add a `_` case to cover the remaining values"))
            }
            _ => None,
        }
    }
}
