//! Tree-walking interpreter for MFL
//!
//! Evaluation recurses directly over the AST, and applying a closure
//! recurses through the closure body on the host stack. There is no tail-call
//! elimination, so deep recursion through closures is bounded by
//! [`Config::max_call_depth`]: once that many applications are in progress
//! evaluation stops with [`EvalError::DepthExceeded`].

mod builtins;
pub mod environment;
pub mod error;
mod pattern;
pub mod value;


use std::rc::Rc;

use tracing::{debug, trace};

use crate::ast::{Expr, ExprKind, Item, Line, Program};
use crate::config::Config;
use crate::desugar;

pub use environment::Environment;
pub use error::EvalError;
pub use pattern::match_pattern;
pub use value::{Closure, Value};

/// Evaluator for MFL expressions and programs
#[derive(Debug, Default)]
pub struct Evaluator {
    config: Config,
    /// Closure applications currently in progress
    depth: usize,
}

impl Evaluator {
    /// Create an evaluator with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator with specific settings
    pub fn with_config(config: Config) -> Self {
        Self { config, depth: 0 }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Evaluate an expression
    pub fn eval(&mut self, expr: &Expr, env: &Environment) -> Result<Value, EvalError> {
        let line = expr.line;
        match &expr.kind {
            ExprKind::Int(n) => Ok(Value::Int(*n)),
            ExprKind::Real(r) => Ok(Value::Real(*r)),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Str(s) => Ok(Value::Str(s.clone())),

            ExprKind::Var(name) => env.resolve(name, line),

            ExprKind::Binary { op, left, right } => self.eval_binary(*op, left, right, env, line),
            ExprKind::Unary { op, expr: operand } => {
                let value = self.eval(operand, env)?;
                builtins::unary(*op, value, line)
            }

            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => match self.eval(cond, env)? {
                Value::Bool(true) => self.eval(then_branch, env),
                Value::Bool(false) => self.eval(else_branch, env),
                other => Err(EvalError::NotABoolean {
                    found: other.kind_name(),
                    line: cond.line,
                }),
            },

            ExprKind::Lambda { param, body } => {
                Ok(Value::closure(param.clone(), Rc::clone(body), env.clone()))
            }

            ExprKind::Apply { func, arg } => {
                let func = self.eval(func, env)?;
                let arg = self.eval(arg, env)?;
                self.apply(&func, arg, line)
            }

            ExprKind::Let { name, value, body } => {
                let value = self.eval(value, env)?;
                self.eval(body, &env.extend(name.clone(), value))
            }

            ExprKind::Match { scrutinee, cases } => {
                let value = self.eval(scrutinee, env)?;
                for case in cases {
                    if let Some(bindings) = match_pattern(&case.pattern, &value) {
                        trace!(line = case.line, "match case selected");
                        return self.eval(&case.body, &env.extend_many(bindings));
                    }
                }
                Err(EvalError::NonExhaustiveMatch { line })
            }

            ExprKind::List(elements) => {
                let items = self.eval_all(elements, env)?;
                Ok(Value::list(items))
            }
            ExprKind::Tuple(elements) => {
                if elements.len() < 2 {
                    return Err(EvalError::TupleArity {
                        found: elements.len(),
                        line,
                    });
                }
                let items = self.eval_all(elements, env)?;
                Ok(Value::tuple(items))
            }

            ExprKind::Head(list) => builtins::head(self.eval(list, env)?, line),
            ExprKind::Tail(list) => builtins::tail(self.eval(list, env)?, line),
            ExprKind::Len(list) => builtins::len(self.eval(list, env)?, line),
            ExprKind::IsEmpty(list) => builtins::is_empty(self.eval(list, env)?, line),

            ExprKind::Map { func, list } => {
                let func = self.eval(func, env)?;
                let list = self.eval(list, env)?;
                self.map(&func, &list, line)
            }
            ExprKind::Fold {
                func,
                init,
                list,
                direction,
            } => {
                let func = self.eval(func, env)?;
                let init = self.eval(init, env)?;
                let list = self.eval(list, env)?;
                self.fold(&func, init, &list, *direction, line)
            }

            ExprKind::StrLen(string) => builtins::strlen(self.eval(string, env)?, line),
            ExprKind::StrCat { left, right } => {
                let left = self.eval(left, env)?;
                let right = self.eval(right, env)?;
                builtins::strcat(left, right, line)
            }
            ExprKind::Substr { string, start, len } => {
                let string = self.eval(string, env)?;
                let start = self.eval(start, env)?;
                let len = self.eval(len, env)?;
                builtins::substr(string, start, len, line)
            }
            ExprKind::Explode(string) => builtins::explode(self.eval(string, env)?, line),

            ExprKind::Proj { index, tuple } => builtins::proj(*index, self.eval(tuple, env)?, line),
            ExprKind::Swap(tuple) => builtins::swap(self.eval(tuple, env)?, line),
            ExprKind::Destruct(tuple) => builtins::destruct(self.eval(tuple, env)?, line),

            ExprKind::Filter { .. } | ExprKind::Compose { .. } | ExprKind::Pipe { .. } => {
                self.eval(&desugar::desugar(expr), env)
            }
        }
    }

    fn eval_all(&mut self, exprs: &[Expr], env: &Environment) -> Result<Vec<Value>, EvalError> {
        exprs.iter().map(|e| self.eval(e, env)).collect()
    }

    /// Apply a function value to one argument
    pub fn apply(&mut self, func: &Value, arg: Value, line: Line) -> Result<Value, EvalError> {
        let closure = match func {
            Value::Closure(closure) => closure,
            other => {
                return Err(EvalError::NotAFunction {
                    found: other.kind_name(),
                    line,
                })
            }
        };

        if self.depth >= self.config.max_call_depth {
            debug!(line, limit = self.config.max_call_depth, "call depth exceeded");
            return Err(EvalError::DepthExceeded {
                limit: self.config.max_call_depth,
                line,
            });
        }

        self.depth += 1;
        trace!(depth = self.depth, param = %closure.param, "apply closure");
        let call_env = closure.env.extend(closure.param.clone(), arg);
        let result = self.eval(&closure.body, &call_env);
        self.depth -= 1;
        result
    }

    /// Evaluate a program; the result is the value of the last item
    pub fn eval_program(
        &mut self,
        program: &Program,
        env: &Environment,
    ) -> Result<Value, EvalError> {
        let mut env = env.clone();
        let mut last = None;
        for item in &program.items {
            let value = match item {
                Item::Val { name, value, line } => {
                    let value = self.eval(value, &env)?;
                    debug!(name = %name, line, "val binding");
                    env = env.extend(name.clone(), value.clone());
                    value
                }
                Item::Expr(expr) => {
                    debug!(line = expr.line, "evaluate item");
                    self.eval(expr, &env)?
                }
            };
            last = Some(value);
        }
        last.ok_or(EvalError::EmptyProgram)
    }
}

/// Evaluate an expression with a default evaluator
pub fn evaluate(expr: &Expr, env: &Environment) -> Result<Value, EvalError> {
    Evaluator::new().eval(expr, env)
}

/// Evaluate a program in an empty environment with a default evaluator
pub fn evaluate_program(program: &Program) -> Result<Value, EvalError> {
    Evaluator::new().eval_program(program, &Environment::new())
}
