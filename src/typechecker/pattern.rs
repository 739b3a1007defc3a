//! Pattern typing.

use crate::ast::{Literal, Pattern};

use super::types::Type;
use super::Inferencer;

impl Inferencer {
    /// The type a pattern accepts, with the monomorphic bindings it introduces
    pub(super) fn infer_pattern(&mut self, pattern: &Pattern) -> (Type, Vec<(String, Type)>) {
        match pattern {
            Pattern::Wildcard => (self.fresh(), Vec::new()),
            Pattern::Var(name) => {
                let ty = self.fresh();
                (ty.clone(), vec![(name.clone(), ty)])
            }
            Pattern::Literal(Literal::Int(_)) => (Type::Int, Vec::new()),
            Pattern::Literal(Literal::Bool(_)) => (Type::Bool, Vec::new()),
            Pattern::Literal(Literal::Str(_)) => (Type::Str, Vec::new()),
        }
    }
}
