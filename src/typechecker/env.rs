//! Type environment for the inferencer.

use crate::scope::Scope;

use super::substitution::Substitution;
use super::types::{Type, TypeScheme, TypeVarId};

/// Name-to-scheme bindings with the same copy-on-extend scoping as the
/// runtime environment
pub type TypeEnv = Scope<TypeScheme>;

impl Scope<TypeScheme> {
    /// Bind `name` to a monomorphic type in a child scope
    pub fn extend_mono(&self, name: impl Into<String>, ty: Type) -> Self {
        self.extend(name, TypeScheme::mono(ty))
    }

    /// Variables still free in the environment once `subst` is applied
    pub fn free_vars(&self, subst: &Substitution) -> Vec<TypeVarId> {
        let mut vars: Vec<TypeVarId> = self
            .iter()
            .flat_map(|(_, scheme)| {
                subst
                    .apply(&scheme.ty)
                    .free_vars()
                    .into_iter()
                    .filter(|v| !scheme.vars.contains(v))
                    .collect::<Vec<_>>()
            })
            .collect();
        vars.sort_unstable();
        vars.dedup();
        vars
    }
}
