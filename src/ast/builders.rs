//! Constructors used by the parser (and tests) to assemble trees.
//!
//! Every builder produces a node at line 0; chain [`Expr::at`] to tag it.

use std::rc::Rc;

use super::*;

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self { kind, line: 0 }
    }

    /// Tag this node with its source line
    pub fn at(mut self, line: Line) -> Self {
        self.line = line;
        self
    }

    pub fn int(value: i64) -> Self {
        Self::new(ExprKind::Int(value))
    }

    pub fn real(value: f64) -> Self {
        Self::new(ExprKind::Real(value))
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(ExprKind::Bool(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ExprKind::Str(value.into()))
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::new(ExprKind::Var(name.into()))
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::new(ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn unary(op: UnaryOp, expr: Expr) -> Self {
        Self::new(ExprKind::Unary {
            op,
            expr: Box::new(expr),
        })
    }

    pub fn if_then_else(cond: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Self::new(ExprKind::If {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    pub fn lambda(param: impl Into<String>, body: Expr) -> Self {
        Self::new(ExprKind::Lambda {
            param: param.into(),
            body: Rc::new(body),
        })
    }

    /// `fn a b c -> body`, curried into nested single-parameter lambdas
    pub fn curried<S: AsRef<str>>(params: &[S], body: Expr) -> Self {
        params
            .iter()
            .rev()
            .fold(body, |body, param| Self::lambda(param.as_ref(), body))
    }

    pub fn apply(func: Expr, arg: Expr) -> Self {
        Self::new(ExprKind::Apply {
            func: Box::new(func),
            arg: Box::new(arg),
        })
    }

    pub fn let_in(name: impl Into<String>, value: Expr, body: Expr) -> Self {
        Self::new(ExprKind::Let {
            name: name.into(),
            value: Box::new(value),
            body: Box::new(body),
        })
    }

    pub fn match_on(scrutinee: Expr, cases: Vec<MatchCase>) -> Self {
        Self::new(ExprKind::Match {
            scrutinee: Box::new(scrutinee),
            cases,
        })
    }

    pub fn list(elements: Vec<Expr>) -> Self {
        Self::new(ExprKind::List(elements))
    }

    pub fn tuple(elements: Vec<Expr>) -> Self {
        Self::new(ExprKind::Tuple(elements))
    }

    pub fn head(list: Expr) -> Self {
        Self::new(ExprKind::Head(Box::new(list)))
    }

    pub fn tail(list: Expr) -> Self {
        Self::new(ExprKind::Tail(Box::new(list)))
    }

    pub fn len(list: Expr) -> Self {
        Self::new(ExprKind::Len(Box::new(list)))
    }

    pub fn is_empty(list: Expr) -> Self {
        Self::new(ExprKind::IsEmpty(Box::new(list)))
    }

    pub fn map(func: Expr, list: Expr) -> Self {
        Self::new(ExprKind::Map {
            func: Box::new(func),
            list: Box::new(list),
        })
    }

    pub fn fold(direction: FoldDirection, func: Expr, init: Expr, list: Expr) -> Self {
        Self::new(ExprKind::Fold {
            func: Box::new(func),
            init: Box::new(init),
            list: Box::new(list),
            direction,
        })
    }

    pub fn foldl(func: Expr, init: Expr, list: Expr) -> Self {
        Self::fold(FoldDirection::Left, func, init, list)
    }

    pub fn foldr(func: Expr, init: Expr, list: Expr) -> Self {
        Self::fold(FoldDirection::Right, func, init, list)
    }

    pub fn filter(pred: Expr, list: Expr) -> Self {
        Self::new(ExprKind::Filter {
            pred: Box::new(pred),
            list: Box::new(list),
        })
    }

    pub fn strlen(string: Expr) -> Self {
        Self::new(ExprKind::StrLen(Box::new(string)))
    }

    pub fn strcat(left: Expr, right: Expr) -> Self {
        Self::new(ExprKind::StrCat {
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn substr(string: Expr, start: Expr, len: Expr) -> Self {
        Self::new(ExprKind::Substr {
            string: Box::new(string),
            start: Box::new(start),
            len: Box::new(len),
        })
    }

    pub fn explode(string: Expr) -> Self {
        Self::new(ExprKind::Explode(Box::new(string)))
    }

    pub fn proj(index: usize, tuple: Expr) -> Self {
        Self::new(ExprKind::Proj {
            index,
            tuple: Box::new(tuple),
        })
    }

    pub fn swap(tuple: Expr) -> Self {
        Self::new(ExprKind::Swap(Box::new(tuple)))
    }

    pub fn destruct(tuple: Expr) -> Self {
        Self::new(ExprKind::Destruct(Box::new(tuple)))
    }

    pub fn compose(outer: Expr, inner: Expr) -> Self {
        Self::new(ExprKind::Compose {
            outer: Box::new(outer),
            inner: Box::new(inner),
        })
    }

    pub fn pipe(value: Expr, func: Expr) -> Self {
        Self::new(ExprKind::Pipe {
            value: Box::new(value),
            func: Box::new(func),
        })
    }
}

impl MatchCase {
    pub fn new(pattern: Pattern, body: Expr) -> Self {
        let line = body.line;
        Self {
            pattern,
            body,
            line,
        }
    }
}

impl Pattern {
    pub fn var(name: impl Into<String>) -> Self {
        Pattern::Var(name.into())
    }

    pub fn int(value: i64) -> Self {
        Pattern::Literal(Literal::Int(value))
    }

    pub fn boolean(value: bool) -> Self {
        Pattern::Literal(Literal::Bool(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Pattern::Literal(Literal::Str(value.into()))
    }
}
