//! Type checker for MFL
//!
//! Algorithm-W style inference: every node produces a type that may still
//! contain variables, and unification against the constraints of the node
//! refines a single [`Substitution`] owned by the [`Inferencer`]. One
//! `Inferencer` spans one checking pass.
//!
//! Overloaded operators (`+`, `<`, `++`, ...) accept a closed set of types.
//! When the operand type is still a variable the restriction is recorded as a
//! pending constraint and checked once the variable is solved; variables that
//! are never solved fall back to `int` when the pass finishes. Equality
//! (`=`, `!=`) admits any type that contains no function.

pub mod env;
pub mod error;
mod pattern;
pub mod substitution;
pub mod types;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use tracing::debug;

use crate::ast::{BinaryOp, Expr, ExprKind, FoldDirection, Item, Line, Program, UnaryOp};
use crate::desugar;

pub use env::TypeEnv;
pub use error::TypeError;
pub use substitution::{Substitution, UnifyError};
pub use types::{Type, TypeScheme, TypeVarId};

/// The set of types an overloaded operator accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperandClass {
    /// `+ - * /` and unary `-`
    Numeric,
    /// `mod`
    Integral,
    /// `< <= > >=`
    Ordered,
    /// `++`
    Concat,
    /// `=` and `!=`
    Equality,
}

impl OperandClass {
    fn describe(self) -> &'static str {
        match self {
            OperandClass::Numeric => "int or real",
            OperandClass::Integral => "int",
            OperandClass::Ordered => "int, real or string",
            OperandClass::Concat => "list or string",
            OperandClass::Equality => "a type without functions",
        }
    }

    /// `None` while an unsolved variable still decides the answer.
    /// `ty` must be fully substituted.
    fn admits(self, ty: &Type) -> Option<bool> {
        if matches!(ty, Type::Var(_)) {
            return None;
        }
        Some(match self {
            OperandClass::Numeric => matches!(ty, Type::Int | Type::Real),
            OperandClass::Integral => matches!(ty, Type::Int),
            OperandClass::Ordered => matches!(ty, Type::Int | Type::Real | Type::Str),
            OperandClass::Concat => matches!(ty, Type::List(_) | Type::Str),
            OperandClass::Equality => return comparable(ty),
        })
    }

    fn default_type(self) -> Option<Type> {
        match self {
            OperandClass::Numeric | OperandClass::Integral | OperandClass::Ordered => {
                Some(Type::Int)
            }
            OperandClass::Concat | OperandClass::Equality => None,
        }
    }
}

/// Whether values of `ty` can be compared: no function anywhere inside
fn comparable(ty: &Type) -> Option<bool> {
    match ty {
        Type::Function(..) => Some(false),
        Type::Var(_) => None,
        Type::List(elem) => comparable(elem),
        Type::Tuple(elems) => {
            let mut verdict = Some(true);
            for elem in elems {
                match comparable(elem) {
                    Some(false) => return Some(false),
                    None => verdict = None,
                    Some(true) => {}
                }
            }
            verdict
        }
        Type::Int | Type::Real | Type::Bool | Type::Str => Some(true),
    }
}

/// A restriction on an operand type that could not be decided yet
#[derive(Debug, Clone)]
struct Constraint {
    class: OperandClass,
    ty: Type,
    op: &'static str,
    line: Line,
}

/// Inference state for one type-checking pass
#[derive(Debug, Default)]
pub struct Inferencer {
    subst: Substitution,
    pending: Vec<Constraint>,
}

impl Inferencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh type variable
    pub fn fresh(&mut self) -> Type {
        self.subst.fresh_var()
    }

    pub fn substitution(&self) -> &Substitution {
        &self.subst
    }

    /// Fully substituted form of `ty` under the current solution
    pub fn apply(&self, ty: &Type) -> Type {
        self.subst.apply(ty)
    }

    /// Keep fresh variables clear of every variable mentioned in `env`,
    /// quantified ones included
    pub fn reserve(&mut self, env: &TypeEnv) {
        for (_, scheme) in env.iter() {
            for var in scheme.ty.free_vars() {
                self.subst.skip_past(var);
            }
        }
    }

    /// Unify, reporting a mismatch as `TypeMismatch`
    pub fn unify(&mut self, expected: &Type, found: &Type, line: Line) -> Result<(), TypeError> {
        self.unify_or(expected, found, line, |expected, found, line| {
            TypeError::TypeMismatch {
                expected,
                found,
                line,
            }
        })
    }

    /// Unify, reporting a mismatch through `on_mismatch` with both types fully
    /// substituted. A failed occurs check is always `InfiniteType`.
    fn unify_or<F>(
        &mut self,
        expected: &Type,
        found: &Type,
        line: Line,
        on_mismatch: F,
    ) -> Result<(), TypeError>
    where
        F: FnOnce(Type, Type, Line) -> TypeError,
    {
        match self.subst.unify(expected, found) {
            Ok(()) => Ok(()),
            Err(UnifyError::Occurs { ty, .. }) => {
                debug!(line, %ty, "occurs check failed");
                Err(TypeError::InfiniteType { ty, line })
            }
            Err(err @ UnifyError::Mismatch { .. }) => {
                debug!(line, %err, "unification failed");
                Err(on_mismatch(
                    self.subst.apply(expected),
                    self.subst.apply(found),
                    line,
                ))
            }
        }
    }

    fn constrain(
        &mut self,
        class: OperandClass,
        ty: &Type,
        op: &'static str,
        line: Line,
    ) -> Result<(), TypeError> {
        let resolved = self.subst.apply(ty);
        match class.admits(&resolved) {
            Some(true) => Ok(()),
            Some(false) => Err(TypeError::InvalidOperand {
                op,
                expected: class.describe(),
                found: resolved,
                line,
            }),
            None => {
                self.pending.push(Constraint {
                    class,
                    ty: resolved,
                    op,
                    line,
                });
                Ok(())
            }
        }
    }

    /// Quantify the variables of `ty` that are free neither in `env` nor in a
    /// pending operator constraint
    pub fn generalize(&self, env: &TypeEnv, ty: &Type) -> TypeScheme {
        let ty = self.subst.apply(ty);
        let env_vars = env.free_vars(&self.subst);
        let pinned: Vec<TypeVarId> = self
            .pending
            .iter()
            .flat_map(|c| self.subst.apply(&c.ty).free_vars())
            .collect();
        let vars = ty
            .free_vars()
            .into_iter()
            .filter(|v| !env_vars.contains(v) && !pinned.contains(v))
            .collect();
        TypeScheme { vars, ty }
    }

    /// Replace the quantified variables of `scheme` with fresh ones
    pub fn instantiate(&mut self, scheme: &TypeScheme) -> Type {
        if scheme.vars.is_empty() {
            return scheme.ty.clone();
        }
        let map: HashMap<TypeVarId, Type> = scheme
            .vars
            .iter()
            .map(|v| (*v, self.fresh()))
            .collect();
        scheme.ty.substitute(&map)
    }

    /// Settle pending constraints and return `ty` fully substituted.
    ///
    /// Unsolved numeric and ordered operands default to `int`; every
    /// constraint is then checked against its final type.
    pub fn finish(&mut self, ty: &Type) -> Result<Type, TypeError> {
        let pending = std::mem::take(&mut self.pending);
        for constraint in &pending {
            if let (Type::Var(_), Some(default)) = (
                self.subst.resolve(&constraint.ty),
                constraint.class.default_type(),
            ) {
                self.unify(&constraint.ty, &default, constraint.line)?;
            }
        }
        for constraint in &pending {
            let resolved = self.subst.apply(&constraint.ty);
            if constraint.class.admits(&resolved) == Some(false) {
                return Err(TypeError::InvalidOperand {
                    op: constraint.op,
                    expected: constraint.class.describe(),
                    found: resolved,
                    line: constraint.line,
                });
            }
        }
        Ok(self.subst.apply(ty))
    }

    /// Infer the type of an expression
    pub fn infer(&mut self, expr: &Expr, env: &TypeEnv) -> Result<Type, TypeError> {
        let line = expr.line;
        match &expr.kind {
            ExprKind::Int(_) => Ok(Type::Int),
            ExprKind::Real(_) => Ok(Type::Real),
            ExprKind::Bool(_) => Ok(Type::Bool),
            ExprKind::Str(_) => Ok(Type::Str),

            ExprKind::Var(name) => match env.lookup(name) {
                Some(scheme) => Ok(self.instantiate(scheme)),
                None => Err(TypeError::UndefinedName {
                    name: name.clone(),
                    line,
                }),
            },

            ExprKind::Binary { op, left, right } => self.infer_binary(*op, left, right, env, line),

            ExprKind::Unary { op, expr: operand } => {
                let ty = self.infer(operand, env)?;
                match op {
                    UnaryOp::Not => {
                        self.unify(&Type::Bool, &ty, line)?;
                        Ok(Type::Bool)
                    }
                    UnaryOp::Neg => {
                        self.constrain(OperandClass::Numeric, &ty, op.symbol(), line)?;
                        Ok(ty)
                    }
                }
            }

            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond_ty = self.infer(cond, env)?;
                self.unify(&Type::Bool, &cond_ty, cond.line)?;
                let then_ty = self.infer(then_branch, env)?;
                let else_ty = self.infer(else_branch, env)?;
                self.unify_or(&then_ty, &else_ty, line, |expected, found, line| {
                    TypeError::BranchTypeMismatch {
                        expected,
                        found,
                        line,
                    }
                })?;
                Ok(self.apply(&then_ty))
            }

            ExprKind::Lambda { param, body } => {
                let param_ty = self.fresh();
                let body_env = env.extend_mono(param.clone(), param_ty.clone());
                let body_ty = self.infer(body, &body_env)?;
                Ok(Type::function(self.apply(&param_ty), body_ty))
            }

            ExprKind::Apply { func, arg } => {
                let func_ty = self.infer(func, env)?;
                let arg_ty = self.infer(arg, env)?;
                let result = self.fresh();
                self.unify(&Type::function(arg_ty, result.clone()), &func_ty, line)?;
                Ok(self.apply(&result))
            }

            ExprKind::Let { name, value, body } => {
                let value_ty = self.infer(value, env)?;
                let scheme = self.generalize(env, &value_ty);
                debug!(name = %name, scheme_vars = scheme.vars.len(), "let binding");
                self.infer(body, &env.extend(name.clone(), scheme))
            }

            ExprKind::Match { scrutinee, cases } => {
                if cases.is_empty() {
                    return Err(TypeError::EmptyMatch { line });
                }
                let scrutinee_ty = self.infer(scrutinee, env)?;
                let result = self.fresh();
                for case in cases {
                    let (pattern_ty, bindings) = self.infer_pattern(&case.pattern);
                    self.unify(&scrutinee_ty, &pattern_ty, case.line)?;
                    let case_env = env.extend_many(
                        bindings
                            .into_iter()
                            .map(|(name, ty)| (name, TypeScheme::mono(ty))),
                    );
                    let body_ty = self.infer(&case.body, &case_env)?;
                    self.unify_or(&result, &body_ty, case.line, |expected, found, line| {
                        TypeError::BranchTypeMismatch {
                            expected,
                            found,
                            line,
                        }
                    })?;
                }
                Ok(self.apply(&result))
            }

            ExprKind::List(elements) => {
                let elem = self.fresh();
                for element in elements {
                    let ty = self.infer(element, env)?;
                    self.unify_or(&elem, &ty, element.line, |expected, found, line| {
                        TypeError::HeterogeneousList {
                            expected,
                            found,
                            line,
                        }
                    })?;
                }
                Ok(Type::list(self.apply(&elem)))
            }

            ExprKind::Tuple(elements) => {
                if elements.len() < 2 {
                    return Err(TypeError::TupleArity {
                        found: elements.len(),
                        line,
                    });
                }
                let types = elements
                    .iter()
                    .map(|e| self.infer(e, env))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Type::Tuple(types))
            }

            ExprKind::Head(list) => {
                let elem = self.infer_list(list, env)?;
                Ok(self.apply(&elem))
            }
            ExprKind::Tail(list) => {
                let elem = self.infer_list(list, env)?;
                Ok(Type::list(self.apply(&elem)))
            }
            ExprKind::Len(list) => {
                self.infer_list(list, env)?;
                Ok(Type::Int)
            }
            ExprKind::IsEmpty(list) => {
                self.infer_list(list, env)?;
                Ok(Type::Bool)
            }

            ExprKind::Map { func, list } => {
                let func_ty = self.infer(func, env)?;
                let elem = self.infer_list(list, env)?;
                let result = self.fresh();
                self.unify(&Type::function(elem, result.clone()), &func_ty, func.line)?;
                Ok(Type::list(self.apply(&result)))
            }

            ExprKind::Fold {
                func,
                init,
                list,
                direction,
            } => {
                let func_ty = self.infer(func, env)?;
                let acc = self.infer(init, env)?;
                let elem = self.infer_list(list, env)?;
                let expected = match direction {
                    FoldDirection::Left => {
                        Type::function(acc.clone(), Type::function(elem, acc.clone()))
                    }
                    FoldDirection::Right => {
                        Type::function(elem, Type::function(acc.clone(), acc.clone()))
                    }
                };
                self.unify(&expected, &func_ty, func.line)?;
                Ok(self.apply(&acc))
            }

            ExprKind::StrLen(string) => {
                self.expect(string, &Type::Str, env)?;
                Ok(Type::Int)
            }
            ExprKind::StrCat { left, right } => {
                self.expect(left, &Type::Str, env)?;
                self.expect(right, &Type::Str, env)?;
                Ok(Type::Str)
            }
            ExprKind::Substr { string, start, len } => {
                self.expect(string, &Type::Str, env)?;
                self.expect(start, &Type::Int, env)?;
                self.expect(len, &Type::Int, env)?;
                Ok(Type::Str)
            }
            ExprKind::Explode(string) => {
                self.expect(string, &Type::Str, env)?;
                Ok(Type::list(Type::Str))
            }

            ExprKind::Proj { index, tuple } => {
                let ty = self.infer(tuple, env)?;
                match self.apply(&ty) {
                    Type::Tuple(elems) => {
                        elems
                            .get(*index)
                            .cloned()
                            .ok_or(TypeError::IndexOutOfBounds {
                                index: *index,
                                arity: elems.len(),
                                line,
                            })
                    }
                    found => Err(TypeError::ExpectedTuple { found, line }),
                }
            }

            ExprKind::Swap(tuple) => {
                let ty = self.infer(tuple, env)?;
                if let Type::Tuple(elems) = self.subst.resolve(&ty) {
                    if elems.len() != 2 {
                        return Err(TypeError::ArityError {
                            expected: 2,
                            found: elems.len(),
                            line,
                        });
                    }
                }
                let first = self.fresh();
                let second = self.fresh();
                self.unify(&Type::Tuple(vec![first.clone(), second.clone()]), &ty, line)?;
                Ok(Type::Tuple(vec![self.apply(&second), self.apply(&first)]))
            }

            ExprKind::Destruct(tuple) => {
                let ty = self.infer(tuple, env)?;
                let elems = match self.apply(&ty) {
                    Type::Tuple(elems) => elems,
                    found => return Err(TypeError::ExpectedTuple { found, line }),
                };
                let (first, rest) = match elems.split_first() {
                    Some(split) => split,
                    None => return Err(TypeError::TupleArity { found: 0, line }),
                };
                let whole = Type::Tuple(elems.clone());
                for elem in rest {
                    self.unify_or(first, elem, line, |_, _, line| {
                        TypeError::HeterogeneousTuple {
                            found: whole.clone(),
                            line,
                        }
                    })?;
                }
                Ok(Type::list(self.apply(first)))
            }

            ExprKind::Filter { .. } | ExprKind::Compose { .. } | ExprKind::Pipe { .. } => {
                self.infer(&desugar::desugar(expr), env)
            }
        }
    }

    fn infer_binary(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        env: &TypeEnv,
        line: Line,
    ) -> Result<Type, TypeError> {
        let left_ty = self.infer(left, env)?;
        let right_ty = self.infer(right, env)?;

        if matches!(op, BinaryOp::And | BinaryOp::Or) {
            self.unify(&Type::Bool, &left_ty, left.line)?;
            self.unify(&Type::Bool, &right_ty, right.line)?;
            return Ok(Type::Bool);
        }

        self.unify(&left_ty, &right_ty, line)?;
        let operand = self.apply(&left_ty);
        let (class, result) = match op {
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
                (Some(OperandClass::Numeric), operand.clone())
            }
            BinaryOp::Mod => (Some(OperandClass::Integral), operand.clone()),
            BinaryOp::Concat => (Some(OperandClass::Concat), operand.clone()),
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
                (Some(OperandClass::Ordered), Type::Bool)
            }
            BinaryOp::Eq | BinaryOp::Ne => (Some(OperandClass::Equality), Type::Bool),
            BinaryOp::And | BinaryOp::Or => (None, Type::Bool),
        };
        if let Some(class) = class {
            self.constrain(class, &operand, op.symbol(), line)?;
        }
        Ok(result)
    }

    /// Infer `expr` as a list and return its element type
    fn infer_list(&mut self, expr: &Expr, env: &TypeEnv) -> Result<Type, TypeError> {
        let ty = self.infer(expr, env)?;
        let elem = self.fresh();
        self.unify(&Type::list(elem.clone()), &ty, expr.line)?;
        Ok(elem)
    }

    fn expect(&mut self, expr: &Expr, expected: &Type, env: &TypeEnv) -> Result<(), TypeError> {
        let ty = self.infer(expr, env)?;
        self.unify(expected, &ty, expr.line)
    }

    /// Infer a whole program; the result is the type of the last item
    pub fn infer_program(&mut self, program: &Program, env: &TypeEnv) -> Result<Type, TypeError> {
        let mut env = env.clone();
        let mut last = None;
        for item in &program.items {
            let ty = match item {
                Item::Val { name, value, line } => {
                    let ty = self.infer(value, &env)?;
                    let scheme = self.generalize(&env, &ty);
                    debug!(name = %name, line, "val binding");
                    env = env.extend(name.clone(), scheme);
                    ty
                }
                Item::Expr(expr) => self.infer(expr, &env)?,
            };
            last = Some(ty);
        }
        match last {
            Some(ty) => self.finish(&ty),
            None => Err(TypeError::EmptyProgram),
        }
    }
}

/// Infer the type of a single expression in a fresh pass
pub fn infer_type(expr: &Expr, env: &TypeEnv) -> Result<Type, TypeError> {
    let mut inferencer = Inferencer::new();
    inferencer.reserve(env);
    let ty = inferencer.infer(expr, env)?;
    inferencer.finish(&ty)
}

/// Infer the type of a program against an empty environment
pub fn infer_program(program: &Program) -> Result<Type, TypeError> {
    Inferencer::new().infer_program(program, &TypeEnv::new())
}
