//! Evaluation errors and their constructors.
//!
//! Every failure the interpreter can raise is built here, so message wording
//! lives in one place. All of them are terminal: the host reports the error
//! and ends the run.

use std::fmt;

use brew_ir::BinaryOp;

use crate::value::ValueType;

/// Result of evaluating an expression.
pub type EvalResult = Result<crate::Value, EvalError>;

/// Failure category reported to the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unresolved identifier, function or arity, or an ambiguous name.
    Name,
    /// Operand or operator mismatch, bad condition, invalid coercion,
    /// member access through a non-object.
    Type,
    /// Resource or arithmetic failure: recursion limit, division by zero,
    /// integer overflow.
    Runtime,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Name => "NAME",
            ErrorKind::Type => "TYPE",
            ErrorKind::Runtime => "RUNTIME",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A terminal evaluation failure.
///
/// `trace` lists the user functions that were active when the error was
/// raised, outermost first. It is filled in at the innermost call boundary.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct EvalError {
    kind: ErrorKind,
    message: String,
    trace: Vec<String>,
}

impl EvalError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        EvalError {
            kind,
            message: message.into(),
            trace: Vec::new(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn backtrace(&self) -> &[String] {
        &self.trace
    }

    /// Attach a backtrace unless one was already recorded deeper in the stack.
    #[must_use]
    pub fn with_backtrace_if_missing(mut self, capture: impl FnOnce() -> Vec<String>) -> Self {
        if self.trace.is_empty() {
            self.trace = capture();
        }
        self
    }

    /// Render the backtrace, most recent call last.
    pub fn format_backtrace(&self) -> String {
        let lines: Vec<String> = self
            .trace
            .iter()
            .map(|name| format!("  in {name}"))
            .collect();
        format!("backtrace (most recent call last):\n{}", lines.join("\n"))
    }
}

fn name_error(message: String) -> EvalError {
    EvalError::new(ErrorKind::Name, message)
}

fn type_error(message: String) -> EvalError {
    EvalError::new(ErrorKind::Type, message)
}

fn runtime_error(message: String) -> EvalError {
    EvalError::new(ErrorKind::Runtime, message)
}

// Name errors

pub fn undefined_variable(name: &str) -> EvalError {
    name_error(format!("variable `{name}` is not defined"))
}

pub fn undefined_function(name: &str, arity: usize) -> EvalError {
    name_error(format!(
        "function `{name}` taking {arity} argument{} is not defined",
        plural(arity)
    ))
}

pub fn missing_entry_point(name: &str) -> EvalError {
    name_error(format!("no zero-argument `{name}` function to run"))
}

pub fn ambiguous_name(name: &str) -> EvalError {
    name_error(format!("`{name}` is both a variable and a function"))
}

pub fn overloaded_function_value(name: &str) -> EvalError {
    name_error(format!(
        "function `{name}` is overloaded and cannot be used as a value"
    ))
}

pub fn undefined_member(object: &str, member: &str) -> EvalError {
    name_error(format!("object `{object}` has no member `{member}`"))
}

pub fn wrong_builtin_args(name: &str, max: usize, got: usize) -> EvalError {
    name_error(format!(
        "no `{name}` taking {got} argument{} (at most {max})",
        plural(got)
    ))
}

pub fn method_arity_mismatch(method: &str, expected: usize, got: usize) -> EvalError {
    name_error(format!(
        "method `{method}` takes {expected} argument{}, got {got}",
        plural(expected)
    ))
}

// Type errors

pub fn binary_type_mismatch(op: BinaryOp, left: ValueType, right: ValueType) -> EvalError {
    type_error(format!(
        "cannot apply `{}` to {left} and {right}",
        op.as_symbol()
    ))
}

pub fn invalid_binary_op(op: BinaryOp, operand: ValueType) -> EvalError {
    type_error(format!(
        "operator `{}` is not defined for {operand}",
        op.as_symbol()
    ))
}

pub fn invalid_unary_op(symbol: &str, operand: ValueType) -> EvalError {
    type_error(format!("unary `{symbol}` is not defined for {operand}"))
}

pub fn invalid_coercion(from: ValueType, to: ValueType) -> EvalError {
    type_error(format!("cannot coerce {from} to {to}"))
}

pub fn non_bool_condition(construct: &str, got: ValueType) -> EvalError {
    type_error(format!("`{construct}` condition must be bool, got {got}"))
}

pub fn not_callable(name: &str, got: ValueType) -> EvalError {
    type_error(format!("`{name}` is a {got}, not a function"))
}

pub fn closure_arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    type_error(format!(
        "function value `{name}` takes {expected} argument{}, got {got}",
        plural(expected)
    ))
}

pub fn not_an_object(name: &str, got: ValueType) -> EvalError {
    type_error(format!("`{name}` is a {got}, not an object"))
}

pub fn invalid_prototype(got: ValueType) -> EvalError {
    type_error(format!("prototype must be an object or nil, got {got}"))
}

pub fn prototype_cycle(object: &str) -> EvalError {
    type_error(format!("prototype of `{object}` would create a cycle"))
}

pub fn unprintable(got: ValueType) -> EvalError {
    type_error(format!("cannot print a {got}"))
}

pub fn invalid_integer_input(text: &str) -> EvalError {
    type_error(format!("input `{text}` is not an integer"))
}

// Runtime errors

pub fn division_by_zero() -> EvalError {
    runtime_error("division by zero".to_string())
}

pub fn integer_overflow(operation: &str) -> EvalError {
    runtime_error(format!("integer overflow in {operation}"))
}

pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    runtime_error(format!("maximum recursion depth exceeded (limit {limit})"))
}

pub fn capture_limit_exceeded(count: usize) -> EvalError {
    runtime_error(format!("too many closure environments ({count} allocated)"))
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
