//! The `Type` enum, type variables and type schemes.
//!
//! Types render in the language's canonical notation: `int`, `[ int ]` for
//! lists, `[int, bool]` for tuples, `int -> int` for functions. Type
//! variables are renamed `'a`, `'b`, ... in order of first appearance, so two
//! alpha-equivalent types always print the same.

use std::collections::HashMap;
use std::fmt;

/// Type variable identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVarId(pub u32);

/// Built-in types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Integer type
    Int,
    /// Floating point type
    Real,
    /// Boolean type
    Bool,
    /// String type
    Str,
    /// List type
    List(Box<Type>),
    /// Tuple type, always at least two elements
    Tuple(Vec<Type>),
    /// Single-argument function type
    Function(Box<Type>, Box<Type>),
    /// Type variable (for inference)
    Var(TypeVarId),
}

impl Type {
    pub fn list(elem: Type) -> Self {
        Type::List(Box::new(elem))
    }

    pub fn function(arg: Type, ret: Type) -> Self {
        Type::Function(Box::new(arg), Box::new(ret))
    }

    /// Free type variables in order of first appearance, without duplicates
    pub fn free_vars(&self) -> Vec<TypeVarId> {
        let mut vars = Vec::new();
        self.collect_vars(&mut vars);
        vars
    }

    fn collect_vars(&self, out: &mut Vec<TypeVarId>) {
        match self {
            Type::Var(id) => {
                if !out.contains(id) {
                    out.push(*id);
                }
            }
            Type::List(elem) => elem.collect_vars(out),
            Type::Tuple(elems) => elems.iter().for_each(|e| e.collect_vars(out)),
            Type::Function(arg, ret) => {
                arg.collect_vars(out);
                ret.collect_vars(out);
            }
            Type::Int | Type::Real | Type::Bool | Type::Str => {}
        }
    }

    /// Replace variables according to `map`, leaving unmapped ones alone
    pub fn substitute(&self, map: &HashMap<TypeVarId, Type>) -> Type {
        match self {
            Type::Var(id) => map.get(id).cloned().unwrap_or_else(|| self.clone()),
            Type::List(elem) => Type::list(elem.substitute(map)),
            Type::Tuple(elems) => Type::Tuple(elems.iter().map(|e| e.substitute(map)).collect()),
            Type::Function(arg, ret) => Type::function(arg.substitute(map), ret.substitute(map)),
            Type::Int | Type::Real | Type::Bool | Type::Str => self.clone(),
        }
    }

    fn write(&self, f: &mut fmt::Formatter<'_>, names: &mut VarNames) -> fmt::Result {
        match self {
            Type::Int => f.write_str("int"),
            Type::Real => f.write_str("real"),
            Type::Bool => f.write_str("bool"),
            Type::Str => f.write_str("string"),
            Type::Var(id) => f.write_str(names.name(*id)),
            Type::List(elem) => {
                f.write_str("[ ")?;
                elem.write(f, names)?;
                f.write_str(" ]")
            }
            Type::Tuple(elems) => {
                f.write_str("[")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    elem.write(f, names)?;
                }
                f.write_str("]")
            }
            Type::Function(arg, ret) => {
                if matches!(**arg, Type::Function(..)) {
                    f.write_str("(")?;
                    arg.write(f, names)?;
                    f.write_str(")")?;
                } else {
                    arg.write(f, names)?;
                }
                f.write_str(" -> ")?;
                ret.write(f, names)
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, &mut VarNames::default())
    }
}

/// Assigns `'a`, `'b`, ... to variables as a type is printed
#[derive(Default)]
struct VarNames {
    names: HashMap<TypeVarId, String>,
}

impl VarNames {
    fn name(&mut self, id: TypeVarId) -> &str {
        let next = self.names.len();
        self.names.entry(id).or_insert_with(|| {
            let letter = (b'a' + (next % 26) as u8) as char;
            match next / 26 {
                0 => format!("'{}", letter),
                n => format!("'{}{}", letter, n),
            }
        })
    }
}

/// A possibly polymorphic type: `forall vars. ty`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeScheme {
    pub vars: Vec<TypeVarId>,
    pub ty: Type,
}

impl TypeScheme {
    /// A scheme with no quantified variables
    pub fn mono(ty: Type) -> Self {
        Self {
            vars: Vec::new(),
            ty,
        }
    }

    /// Free variables of the scheme: those of the body that are not quantified
    pub fn free_vars(&self) -> Vec<TypeVarId> {
        self.ty
            .free_vars()
            .into_iter()
            .filter(|v| !self.vars.contains(v))
            .collect()
    }
}

impl From<Type> for TypeScheme {
    fn from(ty: Type) -> Self {
        TypeScheme::mono(ty)
    }
}
