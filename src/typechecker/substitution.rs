//! Type variable resolution and unification.
//!
//! `Substitution` maps type variables to the types they have been bound to.
//! Bindings are only ever added, never overwritten, and a variable is never
//! bound to a type that contains it.

use std::collections::HashMap;

use thiserror::Error;
use tracing::trace;

use super::types::{Type, TypeVarId};

/// Why two types failed to unify
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnifyError {
    #[error("cannot unify {left} with {right}")]
    Mismatch { left: Type, right: Type },

    #[error("type variable occurs in {ty}")]
    Occurs { var: TypeVarId, ty: Type },
}

/// Substitution map for type variable resolution.
#[derive(Debug, Clone, Default)]
pub struct Substitution {
    /// Resolved type variable bindings
    bindings: HashMap<TypeVarId, Type>,
    /// Counter for generating fresh type variables
    next_var: u32,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh type variable
    pub fn fresh_var(&mut self) -> Type {
        let id = TypeVarId(self.next_var);
        self.next_var += 1;
        Type::Var(id)
    }

    /// Number of variables handed out so far
    pub fn vars_created(&self) -> u32 {
        self.next_var
    }

    /// Never hand out `id` or anything below it
    pub fn skip_past(&mut self, id: TypeVarId) {
        self.next_var = self.next_var.max(id.0 + 1);
    }

    /// Follow variable bindings at the top of `ty` only
    pub fn resolve(&self, ty: &Type) -> Type {
        match ty {
            Type::Var(id) => match self.bindings.get(id) {
                Some(bound) => self.resolve(bound),
                None => ty.clone(),
            },
            _ => ty.clone(),
        }
    }

    /// Apply substitution to a type, resolving all type variables
    pub fn apply(&self, ty: &Type) -> Type {
        match ty {
            Type::Var(id) => match self.bindings.get(id) {
                Some(bound) => self.apply(bound),
                None => ty.clone(),
            },
            Type::List(elem) => Type::list(self.apply(elem)),
            Type::Tuple(elems) => Type::Tuple(elems.iter().map(|e| self.apply(e)).collect()),
            Type::Function(arg, ret) => Type::function(self.apply(arg), self.apply(ret)),
            Type::Int | Type::Real | Type::Bool | Type::Str => ty.clone(),
        }
    }

    /// Unify two types, extending the substitution.
    ///
    /// On failure the substitution may hold bindings made before the
    /// conflicting pair was reached; callers abort inference anyway.
    pub fn unify(&mut self, a: &Type, b: &Type) -> Result<(), UnifyError> {
        let a = self.resolve(a);
        let b = self.resolve(b);

        if a == b {
            return Ok(());
        }

        match (&a, &b) {
            (Type::Var(id), other) | (other, Type::Var(id)) => self.bind(*id, other),
            (Type::List(x), Type::List(y)) => self.unify(x, y),
            (Type::Tuple(xs), Type::Tuple(ys)) if xs.len() == ys.len() => xs
                .iter()
                .zip(ys.iter())
                .try_for_each(|(x, y)| self.unify(x, y)),
            (Type::Function(a1, r1), Type::Function(a2, r2)) => {
                self.unify(a1, a2)?;
                self.unify(r1, r2)
            }
            _ => Err(UnifyError::Mismatch {
                left: self.apply(&a),
                right: self.apply(&b),
            }),
        }
    }

    fn bind(&mut self, id: TypeVarId, ty: &Type) -> Result<(), UnifyError> {
        if self.occurs_in(id, ty) {
            return Err(UnifyError::Occurs {
                var: id,
                ty: self.apply(ty),
            });
        }
        trace!(var = id.0, ty = %self.apply(ty), "bind type variable");
        self.bindings.insert(id, ty.clone());
        Ok(())
    }

    /// Check if a type variable occurs in a type (for occurs check)
    fn occurs_in(&self, id: TypeVarId, ty: &Type) -> bool {
        match self.resolve(ty) {
            Type::Var(other) => other == id,
            Type::List(elem) => self.occurs_in(id, &elem),
            Type::Tuple(elems) => elems.iter().any(|e| self.occurs_in(id, e)),
            Type::Function(arg, ret) => self.occurs_in(id, &arg) || self.occurs_in(id, &ret),
            Type::Int | Type::Real | Type::Bool | Type::Str => false,
        }
    }
}
