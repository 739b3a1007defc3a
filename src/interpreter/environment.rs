//! Execution environment for the MFL interpreter.

use crate::ast::Line;
use crate::scope::Scope;

use super::error::EvalError;
use super::value::Value;

/// Runtime bindings: an immutable chain of scopes shared by closures
pub type Environment = Scope<Value>;

impl Scope<Value> {
    /// Look up a variable, failing with `UndefinedName` when it is unbound
    pub fn resolve(&self, name: &str, line: Line) -> Result<Value, EvalError> {
        self.lookup(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedName {
                name: name.to_string(),
                line,
            })
    }
}
