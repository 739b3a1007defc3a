//! Operators and built-in functions for the MFL interpreter.
//!
//! Contains the binary and unary operators, the higher-order list operations
//! (map, foldl, foldr), and the list, string and tuple primitives.

use std::cmp::Ordering;
use std::rc::Rc;

use super::environment::Environment;
use super::error::EvalError;
use super::value::Value;
use super::Evaluator;
use crate::ast::{BinaryOp, Expr, FoldDirection, Line, UnaryOp};

impl Evaluator {
    pub(super) fn eval_binary(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        env: &Environment,
        line: Line,
    ) -> Result<Value, EvalError> {
        // `and`/`or` only evaluate the right operand when it decides the result
        if let BinaryOp::And | BinaryOp::Or = op {
            let lhs = expect_bool(self.eval(left, env)?, left.line)?;
            if lhs == (op == BinaryOp::Or) {
                return Ok(Value::Bool(lhs));
            }
            let rhs = expect_bool(self.eval(right, env)?, right.line)?;
            return Ok(Value::Bool(rhs));
        }

        let lhs = self.eval(left, env)?;
        let rhs = self.eval(right, env)?;
        binary(op, lhs, rhs, line)
    }

    /// `map f xs`
    pub(super) fn map(&mut self, func: &Value, list: &Value, line: Line) -> Result<Value, EvalError> {
        expect_function(func, line)?;
        let items = expect_list(list, line)?;
        let mapped = items
            .iter()
            .map(|item| self.apply(func, item.clone(), line))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::list(mapped))
    }

    /// `foldl f z xs` applies `f(acc)(x)` first to last; `foldr f z xs`
    /// applies `f(x)(acc)` last to first
    pub(super) fn fold(
        &mut self,
        func: &Value,
        init: Value,
        list: &Value,
        direction: FoldDirection,
        line: Line,
    ) -> Result<Value, EvalError> {
        expect_function(func, line)?;
        let items = expect_list(list, line)?;
        let mut acc = init;
        match direction {
            FoldDirection::Left => {
                for item in items.iter() {
                    acc = self.apply_binary(func, acc, item.clone(), line)?;
                }
            }
            FoldDirection::Right => {
                for item in items.iter().rev() {
                    acc = self.apply_binary(func, item.clone(), acc, line)?;
                }
            }
        }
        Ok(acc)
    }

    /// Apply a curried two-argument function
    fn apply_binary(
        &mut self,
        func: &Value,
        first: Value,
        second: Value,
        line: Line,
    ) -> Result<Value, EvalError> {
        let partial = self.apply(func, first, line)?;
        if !matches!(partial, Value::Closure(_)) {
            return Err(EvalError::FoldRequiresBinaryFunction { line });
        }
        self.apply(&partial, second, line)
    }
}

/// Strictly evaluated binary operators
pub(super) fn binary(op: BinaryOp, lhs: Value, rhs: Value, line: Line) -> Result<Value, EvalError> {
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            arithmetic(op, &lhs, &rhs, line)
        }
        BinaryOp::Concat => concat(lhs, rhs, line),
        BinaryOp::Eq | BinaryOp::Ne => {
            expect_comparable(&lhs, line)?;
            expect_comparable(&rhs, line)?;
            let equal = lhs == rhs;
            Ok(Value::Bool(if op == BinaryOp::Eq { equal } else { !equal }))
        }
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let ordering = compare(&lhs, &rhs, line)?;
            let result = match (op, ordering) {
                (_, None) => false,
                (BinaryOp::Lt, Some(ord)) => ord == Ordering::Less,
                (BinaryOp::Le, Some(ord)) => ord != Ordering::Greater,
                (BinaryOp::Gt, Some(ord)) => ord == Ordering::Greater,
                (_, Some(ord)) => ord != Ordering::Less,
            };
            Ok(Value::Bool(result))
        }
        BinaryOp::And | BinaryOp::Or => {
            let lhs = expect_bool(lhs, line)?;
            let rhs = expect_bool(rhs, line)?;
            Ok(Value::Bool(if op == BinaryOp::And {
                lhs && rhs
            } else {
                lhs || rhs
            }))
        }
    }
}

fn arithmetic(op: BinaryOp, lhs: &Value, rhs: &Value, line: Line) -> Result<Value, EvalError> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => {
            let (a, b) = (*a, *b);
            if b == 0 && matches!(op, BinaryOp::Div | BinaryOp::Mod) {
                return Err(EvalError::DivisionByZero { line });
            }
            Ok(Value::Int(match op {
                BinaryOp::Add => a.wrapping_add(b),
                BinaryOp::Sub => a.wrapping_sub(b),
                BinaryOp::Mul => a.wrapping_mul(b),
                BinaryOp::Div => a.wrapping_div(b),
                _ => a.wrapping_rem(b),
            }))
        }
        (Value::Real(a), Value::Real(b)) => match op {
            BinaryOp::Add => Ok(Value::Real(a + b)),
            BinaryOp::Sub => Ok(Value::Real(a - b)),
            BinaryOp::Mul => Ok(Value::Real(a * b)),
            BinaryOp::Div => Ok(Value::Real(a / b)),
            _ => Err(EvalError::mismatch("int", lhs, line)),
        },
        (Value::Int(_) | Value::Real(_), _) => Err(EvalError::mismatch(lhs.kind_name(), rhs, line)),
        _ => Err(EvalError::mismatch("int or real", lhs, line)),
    }
}

fn concat(lhs: Value, rhs: Value, line: Line) -> Result<Value, EvalError> {
    match (lhs, rhs) {
        (Value::List(a), Value::List(b)) => {
            Ok(Value::list(a.iter().chain(b.iter()).cloned().collect()))
        }
        (Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
        (lhs @ (Value::List(_) | Value::Str(_)), rhs) => {
            Err(EvalError::mismatch(lhs.kind_name(), &rhs, line))
        }
        (lhs, _) => Err(EvalError::mismatch("list or string", &lhs, line)),
    }
}

/// Ordering of two values of the same ordered kind; `None` for NaN
fn compare(lhs: &Value, rhs: &Value, line: Line) -> Result<Option<Ordering>, EvalError> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Ok(Some(a.cmp(b))),
        (Value::Real(a), Value::Real(b)) => Ok(a.partial_cmp(b)),
        (Value::Str(a), Value::Str(b)) => Ok(Some(a.cmp(b))),
        (Value::Int(_) | Value::Real(_) | Value::Str(_), _) => {
            Err(EvalError::mismatch(lhs.kind_name(), rhs, line))
        }
        _ => Err(EvalError::mismatch("int, real or string", lhs, line)),
    }
}

/// Functions have no equality, not even inside lists and tuples
fn expect_comparable(value: &Value, line: Line) -> Result<(), EvalError> {
    match value {
        Value::Closure(_) => Err(EvalError::mismatch("comparable value", value, line)),
        Value::List(items) | Value::Tuple(items) => items
            .iter()
            .try_for_each(|item| expect_comparable(item, line)),
        _ => Ok(()),
    }
}

pub(super) fn unary(op: UnaryOp, value: Value, line: Line) -> Result<Value, EvalError> {
    match (op, value) {
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::Neg, Value::Int(n)) => Ok(Value::Int(n.wrapping_neg())),
        (UnaryOp::Neg, Value::Real(r)) => Ok(Value::Real(-r)),
        (UnaryOp::Not, other) => Err(EvalError::mismatch("bool", &other, line)),
        (UnaryOp::Neg, other) => Err(EvalError::mismatch("int or real", &other, line)),
    }
}

fn expect_bool(value: Value, line: Line) -> Result<bool, EvalError> {
    match value {
        Value::Bool(b) => Ok(b),
        other => Err(EvalError::mismatch("bool", &other, line)),
    }
}

fn expect_function(value: &Value, line: Line) -> Result<(), EvalError> {
    match value {
        Value::Closure(_) => Ok(()),
        other => Err(EvalError::mismatch("function", other, line)),
    }
}

fn expect_list(value: &Value, line: Line) -> Result<&Rc<[Value]>, EvalError> {
    match value {
        Value::List(items) => Ok(items),
        other => Err(EvalError::mismatch("list", other, line)),
    }
}

fn expect_str(value: &Value, line: Line) -> Result<&str, EvalError> {
    match value {
        Value::Str(s) => Ok(s),
        other => Err(EvalError::mismatch("string", other, line)),
    }
}

fn expect_int(value: &Value, line: Line) -> Result<i64, EvalError> {
    match value {
        Value::Int(n) => Ok(*n),
        other => Err(EvalError::mismatch("int", other, line)),
    }
}

fn expect_tuple(value: &Value, line: Line) -> Result<&Rc<[Value]>, EvalError> {
    match value {
        Value::Tuple(items) => Ok(items),
        other => Err(EvalError::mismatch("tuple", other, line)),
    }
}

// ---- lists ----

pub(super) fn head(list: Value, line: Line) -> Result<Value, EvalError> {
    expect_list(&list, line)?
        .first()
        .cloned()
        .ok_or(EvalError::EmptyList { op: "hd", line })
}

pub(super) fn tail(list: Value, line: Line) -> Result<Value, EvalError> {
    match &**expect_list(&list, line)? {
        [] => Err(EvalError::EmptyList { op: "tl", line }),
        [_, rest @ ..] => Ok(Value::List(Rc::from(rest))),
    }
}

pub(super) fn len(list: Value, line: Line) -> Result<Value, EvalError> {
    Ok(Value::Int(expect_list(&list, line)?.len() as i64))
}

pub(super) fn is_empty(list: Value, line: Line) -> Result<Value, EvalError> {
    Ok(Value::Bool(expect_list(&list, line)?.is_empty()))
}

// ---- strings ----

pub(super) fn strlen(string: Value, line: Line) -> Result<Value, EvalError> {
    Ok(Value::Int(expect_str(&string, line)?.chars().count() as i64))
}

pub(super) fn strcat(left: Value, right: Value, line: Line) -> Result<Value, EvalError> {
    let left = expect_str(&left, line)?;
    let right = expect_str(&right, line)?;
    Ok(Value::Str(format!("{}{}", left, right)))
}

/// Characters `[start, start + len)` of `string`
pub(super) fn substr(
    string: Value,
    start: Value,
    len: Value,
    line: Line,
) -> Result<Value, EvalError> {
    let s = expect_str(&string, line)?;
    let start = expect_int(&start, line)?;
    let len = expect_int(&len, line)?;
    let length = s.chars().count();

    let in_bounds = start >= 0
        && len >= 0
        && start
            .checked_add(len)
            .is_some_and(|end| end <= length as i64);
    if !in_bounds {
        return Err(EvalError::RangeError {
            start,
            len,
            length,
            line,
        });
    }

    Ok(Value::Str(
        s.chars().skip(start as usize).take(len as usize).collect(),
    ))
}

/// One single-character string per character
pub(super) fn explode(string: Value, line: Line) -> Result<Value, EvalError> {
    let s = expect_str(&string, line)?;
    Ok(Value::list(
        s.chars().map(|c| Value::Str(c.to_string())).collect(),
    ))
}

// ---- tuples ----

pub(super) fn proj(index: usize, tuple: Value, line: Line) -> Result<Value, EvalError> {
    let items = expect_tuple(&tuple, line)?;
    items.get(index).cloned().ok_or(EvalError::IndexOutOfBounds {
        index,
        arity: items.len(),
        line,
    })
}

pub(super) fn swap(tuple: Value, line: Line) -> Result<Value, EvalError> {
    match &**expect_tuple(&tuple, line)? {
        [first, second] => Ok(Value::tuple(vec![second.clone(), first.clone()])),
        items => Err(EvalError::ArityError {
            expected: 2,
            found: items.len(),
            line,
        }),
    }
}

/// The tuple's elements as a list, in order
pub(super) fn destruct(tuple: Value, line: Line) -> Result<Value, EvalError> {
    let items = expect_tuple(&tuple, line)?;
    Ok(Value::List(Rc::clone(items)))
}
