//! Expression evaluation.

use brew_ir::{Expr, Name, SharedFunction};
use brew_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::diagnostics::EvalCounters;
use crate::environment::CaptureSource;
use crate::errors::{ambiguous_name, overloaded_function_value, undefined_variable, EvalResult};
use crate::function_table::NamedFunction;
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;
use crate::Value;

impl Interpreter<'_> {
    /// Evaluate an expression.
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> EvalResult {
        self.profile(EvalCounters::count_expression);
        match expr {
            Expr::Int(n) => Ok(Value::Int(*n)),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Str(s) => Ok(Value::string(s.as_str())),
            Expr::Nil => Ok(Value::Nil),
            Expr::Var(name) => self.eval_identifier(*name),
            Expr::Member { object, field } => self.get_member(*object, *field),
            Expr::Lambda(def) => self.capture_lambda(def),
            Expr::NewObject => Ok(Value::new_object()),
            Expr::Call { callee, args } => self.eval_call(*callee, args),
            Expr::MethodCall {
                object,
                method,
                args,
            } => self.eval_method_call(*object, *method, args),
            Expr::Binary { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                evaluate_binary(left, right, *op)
            }
            Expr::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                evaluate_unary(&value, *op)
            }
        }
    }

    /// Resolve a bare identifier.
    ///
    /// A variable wins, unless a top-level function has the same name, which
    /// is ambiguous. An unbound name that names exactly one function yields
    /// that function as a value.
    fn eval_identifier(&self, name: Name) -> EvalResult {
        let is_function = self.functions.contains(name);
        match self.env.lookup(name) {
            Some(_) if is_function => Err(ambiguous_name(self.name_str(name))),
            Some(value) => Ok(value),
            None => match self.functions.sole(name) {
                NamedFunction::Unique(def) => Ok(Value::closure(def.clone(), None)),
                NamedFunction::Overloaded => Err(overloaded_function_value(self.name_str(name))),
                NamedFunction::Missing => Err(undefined_variable(self.name_str(name))),
            },
        }
    }

    /// Close a lambda over a snapshot of every visible binding, in a new
    /// alias group.
    fn capture_lambda(&mut self, def: &SharedFunction) -> EvalResult {
        let snapshot = self.env.flatten();
        tracing::trace!(bindings = snapshot.len(), "capture lambda");
        let id = self
            .env
            .register_alias_group(&[], CaptureSource::Snapshot(snapshot))?;
        Ok(Value::closure(def.clone(), Some(id)))
    }
}
