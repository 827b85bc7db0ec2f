//! Statement execution.

use brew_ir::{Expr, Name, Place, Stmt};

use super::{ExecOutcome, Interpreter};
use crate::diagnostics::EvalCounters;
use crate::environment::CaptureSource;
use crate::errors::{non_bool_condition, EvalError};
use crate::operators::truthiness;
use crate::Value;

type ExecResult = Result<ExecOutcome, EvalError>;

impl Interpreter<'_> {
    /// Run a statement list in its own frame.
    pub(crate) fn exec_block(&mut self, stmts: &[Stmt]) -> ExecResult {
        self.with_env_scope(|scoped| scoped.exec_statements(stmts))
    }

    /// Run statements in the current frame, stopping at the first `return`.
    pub(crate) fn exec_statements(&mut self, stmts: &[Stmt]) -> ExecResult {
        for stmt in stmts {
            if let ExecOutcome::Return(value) = self.exec_stmt(stmt)? {
                return Ok(ExecOutcome::Return(value));
            }
        }
        Ok(ExecOutcome::Continue)
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        self.profile(EvalCounters::count_statement);
        match stmt {
            Stmt::Assign { target, value } => {
                let value = self.eval_assigned(target, value)?;
                self.assign_place(target, value)?;
                Ok(ExecOutcome::Continue)
            }
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_condition(cond, "if")? {
                    self.exec_block(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec_block(else_branch)
                } else {
                    Ok(ExecOutcome::Continue)
                }
            }
            Stmt::While { cond, body } => {
                while self.eval_condition(cond, "while")? {
                    if let ExecOutcome::Return(value) = self.exec_block(body)? {
                        return Ok(ExecOutcome::Return(value));
                    }
                }
                Ok(ExecOutcome::Continue)
            }
            Stmt::Return(expr) => {
                let value = match expr {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::Nil,
                };
                Ok(ExecOutcome::Return(value))
            }
            Stmt::Expr(expr) => {
                self.eval_expr(expr)?;
                Ok(ExecOutcome::Continue)
            }
        }
    }

    /// Evaluate an `if`/`while` condition: a `Bool`, or an `Int` read as
    /// nonzero-is-true.
    fn eval_condition(&mut self, cond: &Expr, construct: &str) -> Result<bool, EvalError> {
        let value = self.eval_expr(cond)?;
        truthiness(&value).ok_or_else(|| non_bool_condition(construct, value.type_of()))
    }

    /// Evaluate the right-hand side of an assignment, applying the closure
    /// sharing rules:
    ///
    /// - from a variable or member reference: the target joins the source's
    ///   alias group and shares its captured environment
    /// - from a lambda literal: the target joins the lambda's new group
    /// - from any other expression (a call result): the target gets its own
    ///   copy of the captured environment
    fn eval_assigned(&mut self, target: &Place, expr: &Expr) -> Result<Value, EvalError> {
        let value = self.eval_expr(expr)?;
        let Value::Closure(closure) = &value else {
            return Ok(value);
        };
        let Some(capture) = closure.capture else {
            return Ok(value);
        };
        let members: &[Name] = match target {
            Place::Var(name) => std::slice::from_ref(name),
            Place::Member { .. } => &[],
        };
        match expr {
            Expr::Var(_) | Expr::Member { .. } | Expr::Lambda(_) => {
                self.env
                    .register_alias_group(members, CaptureSource::Existing(capture))?;
                Ok(value)
            }
            _ => {
                let forked = self.env.fork_capture(capture)?;
                self.env
                    .register_alias_group(members, CaptureSource::Existing(forked))?;
                Ok(Value::closure(closure.func.clone(), Some(forked)))
            }
        }
    }

    fn assign_place(&mut self, target: &Place, value: Value) -> Result<(), EvalError> {
        match *target {
            Place::Var(name) => {
                self.env.assign(name, value);
                Ok(())
            }
            Place::Member { object, field } => self.set_member(object, field, value),
        }
    }
}
