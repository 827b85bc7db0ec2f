//! Function call evaluation methods for the Interpreter.

use brew_ir::{Expr, Name, ParamMode, SharedFunction};
use brew_stack::ensure_sufficient_stack;

use super::{ExecOutcome, Interpreter};
use crate::diagnostics::EvalCounters;
use crate::environment::CaptureId;
use crate::errors::{
    closure_arity_mismatch, method_arity_mismatch, not_callable, undefined_function,
    undefined_member, EvalResult,
};
use crate::value::ObjectHandle;
use crate::Value;

impl Interpreter<'_> {
    /// Evaluate `callee(args)`.
    ///
    /// Resolution order: built-ins, then a variable named `callee` (which must
    /// hold a closure of the right arity), then the function table by
    /// `(callee, arity)`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub(super) fn eval_call(&mut self, callee: Name, args: &[Expr]) -> EvalResult {
        if let Some(builtin) = self.names.builtin(callee) {
            return self.eval_builtin(builtin, callee, args);
        }
        self.profile(EvalCounters::count_function_call);

        if let Some(value) = self.env.lookup(callee) {
            let Value::Closure(closure) = &value else {
                return Err(not_callable(self.name_str(callee), value.type_of()));
            };
            if closure.func.arity() != args.len() {
                return Err(closure_arity_mismatch(
                    self.name_str(callee),
                    closure.func.arity(),
                    args.len(),
                ));
            }
            tracing::debug!(callee = self.name_str(callee), "call through variable");
            return self.call_function(&closure.func, closure.capture, args, None);
        }

        let Some(def) = self.functions.resolve(callee, args.len()).cloned() else {
            return Err(undefined_function(self.name_str(callee), args.len()));
        };
        tracing::debug!(callee = self.name_str(callee), "call");
        self.call_function(&def, None, args, None)
    }

    /// Evaluate `object.method(args)` with `this` bound to `object`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub(super) fn eval_method_call(&mut self, object: Name, method: Name, args: &[Expr]) -> EvalResult {
        self.profile(EvalCounters::count_method_call);
        let receiver = self.object_named(object)?;
        let Some(member) = receiver.get_member(method) else {
            return Err(undefined_member(self.name_str(object), self.name_str(method)));
        };
        let Value::Closure(closure) = &member else {
            return Err(not_callable(self.name_str(method), member.type_of()));
        };
        if closure.func.arity() != args.len() {
            return Err(method_arity_mismatch(
                self.name_str(method),
                closure.func.arity(),
                args.len(),
            ));
        }
        self.call_function(&closure.func, closure.capture, args, Some(receiver))
    }

    /// Call a user function or closure.
    ///
    /// Arguments are evaluated in the caller's environment first. Then the
    /// call frames are pushed and the parameters bound: by-value parameters
    /// get the value, by-reference parameters additionally write back to the
    /// caller's variable when the actual argument is a bare variable.
    pub(crate) fn call_function(
        &mut self,
        def: &SharedFunction,
        capture: Option<CaptureId>,
        args: &[Expr],
        this: Option<ObjectHandle>,
    ) -> EvalResult {
        let caller_frames = self.env.depth();
        let values = args
            .iter()
            .map(|arg| self.eval_expr(arg))
            .collect::<Result<Vec<_>, _>>()?;

        if let Err(err) = self.call_stack.push(def.name) {
            return Err(err.with_backtrace_if_missing(|| self.call_stack.capture(self.interner)));
        }
        let outcome = ensure_sufficient_stack(|| {
            self.with_call_frames(capture, |scoped| {
                for ((param, value), arg) in def.params.iter().zip(values).zip(args) {
                    scoped.env.declare(param.name, value);
                    if param.mode == ParamMode::Reference {
                        if let Some(symbol) = arg.as_var() {
                            scoped
                                .env
                                .bind_reference_param(param.name, symbol, caller_frames);
                        }
                    }
                }
                if let Some(receiver) = this {
                    let this_name = scoped.names.this;
                    scoped.env.declare(this_name, Value::Object(receiver));
                }
                scoped.exec_block(&def.body)
            })
        });
        let result = match outcome {
            Ok(ExecOutcome::Return(value)) => Ok(value),
            Ok(ExecOutcome::Continue) => Ok(Value::Nil),
            Err(err) => Err(err.with_backtrace_if_missing(|| self.call_stack.capture(self.interner))),
        };
        self.call_stack.pop();
        result
    }
}
