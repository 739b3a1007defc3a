//! Abstract Syntax Tree definitions for MFL
//!
//! The core never parses source text. An external parser builds these nodes
//! and tags every one of them with the source line it came from; the
//! interpreter and the type checker both dispatch on the same tree.

use std::fmt;
use std::rc::Rc;

mod builders;
mod display;

/// Source line a node was parsed from (1-indexed, 0 when synthesized)
pub type Line = u32;

/// An expression node together with its source line
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub line: Line,
}

/// Every expression form of the language.
///
/// `Filter`, `Compose` and `Pipe` are sugar: they are never evaluated or
/// type-checked directly but rewritten by [`crate::desugar`] first.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    // Literals
    Int(i64),
    Real(f64),
    Bool(bool),
    Str(String),

    // Identifiers
    Var(String),

    // Operations
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },

    // Control flow and binding
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Lambda {
        param: String,
        /// Shared with every closure created from this lambda
        body: Rc<Expr>,
    },
    Apply {
        func: Box<Expr>,
        arg: Box<Expr>,
    },
    Let {
        name: String,
        value: Box<Expr>,
        body: Box<Expr>,
    },
    Match {
        scrutinee: Box<Expr>,
        cases: Vec<MatchCase>,
    },

    // Compound literals
    List(Vec<Expr>),
    Tuple(Vec<Expr>),

    // List built-ins
    Head(Box<Expr>),
    Tail(Box<Expr>),
    Len(Box<Expr>),
    IsEmpty(Box<Expr>),
    Map {
        func: Box<Expr>,
        list: Box<Expr>,
    },
    Fold {
        func: Box<Expr>,
        init: Box<Expr>,
        list: Box<Expr>,
        direction: FoldDirection,
    },

    // String built-ins
    StrLen(Box<Expr>),
    StrCat {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Substr {
        string: Box<Expr>,
        start: Box<Expr>,
        len: Box<Expr>,
    },
    Explode(Box<Expr>),

    // Tuple built-ins
    Proj {
        index: usize,
        tuple: Box<Expr>,
    },
    Swap(Box<Expr>),
    Destruct(Box<Expr>),

    // Sugar
    Filter {
        pred: Box<Expr>,
        list: Box<Expr>,
    },
    /// `outer o inner`
    Compose {
        outer: Box<Expr>,
        inner: Box<Expr>,
    },
    /// `value |> func`
    Pipe {
        value: Box<Expr>,
        func: Box<Expr>,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Sequences
    Concat,

    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Source spelling of the operator
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "mod",
            BinaryOp::Concat => "++",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "not",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Which end of the list a fold starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldDirection {
    /// `foldl f z xs`: `f(acc)(x)` for each element, first to last
    Left,
    /// `foldr f z xs`: `f(x)(acc)` for each element, last to first
    Right,
}

/// One `| pattern -> body` arm of a match
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCase {
    pub pattern: Pattern,
    pub body: Expr,
    pub line: Line,
}

/// Pattern for matching
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// `_`
    Wildcard,
    /// Binds the scrutinee to a name
    Var(String),
    /// Matches a structurally equal constant
    Literal(Literal),
}

/// Constants usable in patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Str(s) => write!(f, "{:?}", s),
        }
    }
}

/// A whole program: `val` bindings and expressions separated by `;`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub items: Vec<Item>,
}

/// Top-level program item
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// `val name := value;` binds `name` for every later item
    Val {
        name: String,
        value: Expr,
        line: Line,
    },
    /// A bare expression
    Expr(Expr),
}

impl Program {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl Item {
    pub fn val(name: impl Into<String>, value: Expr) -> Self {
        let line = value.line;
        Item::Val {
            name: name.into(),
            value,
            line,
        }
    }

    pub fn line(&self) -> Line {
        match self {
            Item::Val { line, .. } => *line,
            Item::Expr(expr) => expr.line,
        }
    }
}

impl From<Expr> for Item {
    fn from(expr: Expr) -> Self {
        Item::Expr(expr)
    }
}
