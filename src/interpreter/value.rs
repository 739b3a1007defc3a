//! Runtime value types for the MFL interpreter.

use std::fmt;
use std::rc::Rc;

use crate::ast::Expr;

use super::environment::Environment;

/// Runtime value
#[derive(Debug, Clone)]
pub enum Value {
    /// Integer
    Int(i64),
    /// Floating point number
    Real(f64),
    /// Boolean
    Bool(bool),
    /// Text string
    Str(String),
    /// Homogeneous list of values, shared rather than copied
    List(Rc<[Value]>),
    /// Fixed-arity (>= 2) heterogeneous sequence
    Tuple(Rc<[Value]>),
    /// Function closure
    Closure(Rc<Closure>),
}

/// A lambda paired with the environment it was created in
pub struct Closure {
    /// Name bound to the argument on application
    pub param: String,
    /// Shared with the lambda node the closure came from
    pub body: Rc<Expr>,
    /// The defining environment
    pub env: Environment,
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("param", &self.param)
            .field("env", &self.env)
            .finish_non_exhaustive()
    }
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(items.into())
    }

    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(items.into())
    }

    pub fn closure(param: impl Into<String>, body: Rc<Expr>, env: Environment) -> Self {
        Value::Closure(Rc::new(Closure {
            param: param.into(),
            body,
            env,
        }))
    }

    /// Name of the value's kind, for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Real(_) => "real",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Closure(_) => "function",
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Structural equality. Closures are never equal, not even to themselves.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            // Display never uses exponent form but drops a zero fraction
            Value::Real(r) if r.is_finite() && r.fract() == 0.0 => write!(f, "{}.0", r),
            Value::Real(r) => write!(f, "{}", r),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => f.write_str(s),
            Value::List(items) | Value::Tuple(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Closure(_) => f.write_str("fn"),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Value::Real(r)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}
