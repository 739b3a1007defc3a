//! Indented tree dump of an expression, two spaces per nesting level.

use std::fmt::Write;

use super::*;

impl Expr {
    /// Render this subtree with its root indented by `indent` spaces
    pub fn display(&self, indent: usize) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, indent);
        out
    }

    fn write_tree(&self, out: &mut String, indent: usize) {
        let child = indent + 2;
        match &self.kind {
            ExprKind::Int(n) => line(out, indent, format_args!("Int({})", n)),
            ExprKind::Real(r) => line(out, indent, format_args!("Real({:?})", r)),
            ExprKind::Bool(b) => line(out, indent, format_args!("Bool({})", b)),
            ExprKind::Str(s) => line(out, indent, format_args!("Str({:?})", s)),
            ExprKind::Var(name) => line(out, indent, format_args!("Var[{}]", name)),
            ExprKind::Binary { op, left, right } => {
                line(out, indent, format_args!("BinOp({})", op));
                left.write_tree(out, child);
                right.write_tree(out, child);
            }
            ExprKind::Unary { op, expr } => {
                line(out, indent, format_args!("UnaryOp({})", op));
                expr.write_tree(out, child);
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                line(out, indent, format_args!("If"));
                cond.write_tree(out, child);
                then_branch.write_tree(out, child);
                else_branch.write_tree(out, child);
            }
            ExprKind::Lambda { param, body } => {
                line(out, indent, format_args!("Lambda[{}]", param));
                body.write_tree(out, child);
            }
            ExprKind::Apply { func, arg } => {
                line(out, indent, format_args!("Apply"));
                func.write_tree(out, child);
                arg.write_tree(out, child);
            }
            ExprKind::Let { name, value, body } => {
                line(out, indent, format_args!("Let[{}]", name));
                value.write_tree(out, child);
                body.write_tree(out, child);
            }
            ExprKind::Match { scrutinee, cases } => {
                line(out, indent, format_args!("Match"));
                scrutinee.write_tree(out, child);
                for case in cases {
                    line(out, child, format_args!("Case"));
                    case.pattern.write_tree(out, child + 2);
                    case.body.write_tree(out, child + 2);
                }
            }
            ExprKind::List(elements) => {
                line(out, indent, format_args!("List"));
                for element in elements {
                    element.write_tree(out, child);
                }
            }
            ExprKind::Tuple(elements) => {
                line(out, indent, format_args!("Tuple"));
                for element in elements {
                    element.write_tree(out, child);
                }
            }
            ExprKind::Head(e) => unary_node(out, indent, "Head", e),
            ExprKind::Tail(e) => unary_node(out, indent, "Tail", e),
            ExprKind::Len(e) => unary_node(out, indent, "Len", e),
            ExprKind::IsEmpty(e) => unary_node(out, indent, "IsEmpty", e),
            ExprKind::Map { func, list } => {
                line(out, indent, format_args!("Map"));
                func.write_tree(out, child);
                list.write_tree(out, child);
            }
            ExprKind::Fold {
                func,
                init,
                list,
                direction,
            } => {
                let label = match direction {
                    FoldDirection::Left => "Foldl",
                    FoldDirection::Right => "Foldr",
                };
                line(out, indent, format_args!("{}", label));
                func.write_tree(out, child);
                init.write_tree(out, child);
                list.write_tree(out, child);
            }
            ExprKind::StrLen(e) => unary_node(out, indent, "StrLen", e),
            ExprKind::StrCat { left, right } => {
                line(out, indent, format_args!("StrCat"));
                left.write_tree(out, child);
                right.write_tree(out, child);
            }
            ExprKind::Substr { string, start, len } => {
                line(out, indent, format_args!("Substr"));
                string.write_tree(out, child);
                start.write_tree(out, child);
                len.write_tree(out, child);
            }
            ExprKind::Explode(e) => unary_node(out, indent, "Explode", e),
            ExprKind::Proj { index, tuple } => {
                line(out, indent, format_args!("Proj[{}]", index));
                tuple.write_tree(out, child);
            }
            ExprKind::Swap(e) => unary_node(out, indent, "Swap", e),
            ExprKind::Destruct(e) => unary_node(out, indent, "Destruct", e),
            ExprKind::Filter { pred, list } => {
                line(out, indent, format_args!("Filter"));
                pred.write_tree(out, child);
                list.write_tree(out, child);
            }
            ExprKind::Compose { outer, inner } => {
                line(out, indent, format_args!("Compose"));
                outer.write_tree(out, child);
                inner.write_tree(out, child);
            }
            ExprKind::Pipe { value, func } => {
                line(out, indent, format_args!("Pipe"));
                value.write_tree(out, child);
                func.write_tree(out, child);
            }
        }
    }
}

impl Pattern {
    fn write_tree(&self, out: &mut String, indent: usize) {
        match self {
            Pattern::Wildcard => line(out, indent, format_args!("Pattern(_)")),
            Pattern::Var(name) => line(out, indent, format_args!("PatternVar({})", name)),
            Pattern::Literal(lit) => line(out, indent, format_args!("PatternLit({})", lit)),
        }
    }
}

fn unary_node(out: &mut String, indent: usize, label: &str, operand: &Expr) {
    line(out, indent, format_args!("{}", label));
    operand.write_tree(out, indent + 2);
}

fn line(out: &mut String, indent: usize, text: std::fmt::Arguments<'_>) {
    // Writing into a String cannot fail
    let _ = writeln!(out, "{:indent$}{}", "", text, indent = indent);
}
