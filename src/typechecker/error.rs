//! Static type errors.

use thiserror::Error;

use crate::ast::Line;
use crate::diagnostics::types as codes;

use super::types::Type;

/// Failure raised while inferring a type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("line {line}: type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: Type,
        found: Type,
        line: Line,
    },

    #[error("line {line}: branches have different types: {expected} and {found}")]
    BranchTypeMismatch {
        expected: Type,
        found: Type,
        line: Line,
    },

    #[error("line {line}: operator `{op}` expects {expected} operands, found {found}")]
    InvalidOperand {
        op: &'static str,
        expected: &'static str,
        found: Type,
        line: Line,
    },

    #[error("line {line}: undefined variable: {name}")]
    UndefinedName { name: String, line: Line },

    #[error("line {line}: infinite type: {ty} would contain itself")]
    InfiniteType { ty: Type, line: Line },

    #[error("line {line}: index {index} out of bounds for tuple of arity {arity}")]
    IndexOutOfBounds {
        index: usize,
        arity: usize,
        line: Line,
    },

    #[error("line {line}: expected a tuple of known arity, found {found}")]
    ExpectedTuple { found: Type, line: Line },

    #[error("line {line}: tuple elements do not share a common type: {found}")]
    HeterogeneousTuple { found: Type, line: Line },

    #[error("line {line}: list elements do not share a common type: {expected} and {found}")]
    HeterogeneousList {
        expected: Type,
        found: Type,
        line: Line,
    },

    #[error("line {line}: expected a tuple of arity {expected}, found arity {found}")]
    ArityError {
        expected: usize,
        found: usize,
        line: Line,
    },

    #[error("line {line}: tuple literal requires at least 2 elements, got {found}")]
    TupleArity { found: usize, line: Line },

    #[error("line {line}: match expression has no cases")]
    EmptyMatch { line: Line },

    #[error("program has no items")]
    EmptyProgram,
}

impl TypeError {
    /// Stable error code (E1xxx series)
    pub fn code(&self) -> &'static str {
        match self {
            TypeError::TypeMismatch { .. } | TypeError::InvalidOperand { .. } => {
                codes::TYPE_MISMATCH
            }
            TypeError::BranchTypeMismatch { .. } => codes::BRANCH_MISMATCH,
            TypeError::UndefinedName { .. } => codes::UNKNOWN_IDENTIFIER,
            TypeError::InfiniteType { .. } => codes::RECURSIVE_TYPE,
            TypeError::IndexOutOfBounds { .. } => codes::INDEX_OUT_OF_BOUNDS,
            TypeError::ExpectedTuple { .. } => codes::EXPECTED_TUPLE,
            TypeError::HeterogeneousTuple { .. } => codes::HETEROGENEOUS_TUPLE,
            TypeError::HeterogeneousList { .. } => codes::HETEROGENEOUS_LIST,
            TypeError::ArityError { .. } => codes::WRONG_ARITY,
            TypeError::TupleArity { .. } => codes::TUPLE_TOO_SHORT,
            TypeError::EmptyMatch { .. } => codes::EMPTY_MATCH,
            TypeError::EmptyProgram => codes::EMPTY_PROGRAM,
        }
    }

    /// Source line of the offending node; 0 when no node is involved
    pub fn line(&self) -> Line {
        match self {
            TypeError::TypeMismatch { line, .. }
            | TypeError::BranchTypeMismatch { line, .. }
            | TypeError::InvalidOperand { line, .. }
            | TypeError::UndefinedName { line, .. }
            | TypeError::InfiniteType { line, .. }
            | TypeError::IndexOutOfBounds { line, .. }
            | TypeError::ExpectedTuple { line, .. }
            | TypeError::HeterogeneousTuple { line, .. }
            | TypeError::HeterogeneousList { line, .. }
            | TypeError::ArityError { line, .. }
            | TypeError::TupleArity { line, .. }
            | TypeError::EmptyMatch { line } => *line,
            TypeError::EmptyProgram => 0,
        }
    }
}

impl miette::Diagnostic for TypeError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(TypeError::code(self)))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        match self {
            TypeError::ExpectedTuple { .. } => Some(Box::new(
                "the tuple's type must be known before `proj` is applied to it",
            )),
            TypeError::HeterogeneousTuple { .. } => Some(Box::new(
                "`destruct` only accepts tuples whose elements all have the same type",
            )),
            _ => None,
        }
    }
}
