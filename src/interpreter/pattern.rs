//! Pattern matching for MFL values.

use super::value::Value;
use crate::ast::{Literal, Pattern};

/// Match a pattern against a value, returning bindings if successful
pub fn match_pattern(pattern: &Pattern, value: &Value) -> Option<Vec<(String, Value)>> {
    match pattern {
        // Wildcard matches anything
        Pattern::Wildcard => Some(vec![]),

        // Identifier binds the value
        Pattern::Var(name) => Some(vec![(name.clone(), value.clone())]),

        Pattern::Literal(lit) => literal_matches(lit, value).then(Vec::new),
    }
}

fn literal_matches(lit: &Literal, value: &Value) -> bool {
    match (lit, value) {
        (Literal::Int(p), Value::Int(v)) => p == v,
        (Literal::Bool(p), Value::Bool(v)) => p == v,
        (Literal::Str(p), Value::Str(v)) => p == v,
        _ => false,
    }
}
