//! Desugaring - rewrite sugar nodes into the core node set
//!
//! - `f o g` → `fn %compose -> f(g(%compose))`
//! - `a |> f` → `f(a)`
//! - `filter p xs` → a single `foldr` that keeps the elements satisfying `p`
//!
//! Rewrites are pure and deterministic: the same node always produces the
//! same core tree, so the evaluator and the type checker can each desugar
//! independently. Generated names start with `%`, which no identifier can
//! contain, so they never capture user variables.

use std::borrow::Cow;

use tracing::trace;

use crate::ast::{BinaryOp, Expr, ExprKind, Line};

const COMPOSE_ARG: &str = "%compose";
const FILTER_PRED: &str = "%filter_pred";
const FILTER_ELEM: &str = "%filter_x";
const FILTER_ACC: &str = "%filter_acc";

/// Rewrite a sugar node into core nodes. Core nodes come back borrowed and
/// unchanged; only the outermost node is rewritten.
pub fn desugar(expr: &Expr) -> Cow<'_, Expr> {
    match &expr.kind {
        ExprKind::Compose { outer, inner } => Cow::Owned(compose(outer, inner, expr.line)),
        ExprKind::Pipe { value, func } => Cow::Owned(pipe(value, func, expr.line)),
        ExprKind::Filter { pred, list } => Cow::Owned(filter(pred, list, expr.line)),
        _ => Cow::Borrowed(expr),
    }
}

/// `outer o inner` as a lambda applying `inner` first
fn compose(outer: &Expr, inner: &Expr, line: Line) -> Expr {
    trace!(line, "desugar composition");
    let arg = Expr::var(COMPOSE_ARG).at(line);
    let inner_call = Expr::apply(inner.clone(), arg).at(line);
    let outer_call = Expr::apply(outer.clone(), inner_call).at(line);
    Expr::lambda(COMPOSE_ARG, outer_call).at(line)
}

/// `value |> func` as a plain application
fn pipe(value: &Expr, func: &Expr, line: Line) -> Expr {
    trace!(line, "desugar pipeline");
    Expr::apply(func.clone(), value.clone()).at(line)
}

/// `filter pred list` as
/// `let %p := pred in foldr (fn x -> fn acc -> if %p(x) then [x] ++ acc else acc) [] list`
///
/// The predicate is bound once so it is evaluated a single time.
fn filter(pred: &Expr, list: &Expr, line: Line) -> Expr {
    trace!(line, "desugar filter");
    let var = |name: &str| Expr::var(name).at(line);

    let test = Expr::apply(var(FILTER_PRED), var(FILTER_ELEM)).at(line);
    let keep = Expr::binary(
        BinaryOp::Concat,
        Expr::list(vec![var(FILTER_ELEM)]).at(line),
        var(FILTER_ACC),
    )
    .at(line);
    let step = Expr::if_then_else(test, keep, var(FILTER_ACC)).at(line);
    let step = Expr::lambda(FILTER_ELEM, Expr::lambda(FILTER_ACC, step).at(line)).at(line);

    let fold = Expr::foldr(step, Expr::list(Vec::new()).at(line), list.clone()).at(line);
    Expr::let_in(FILTER_PRED, pred.clone(), fold).at(line)
}
