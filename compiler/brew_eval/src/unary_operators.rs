//! Unary operator implementations for the evaluator.

use brew_ir::UnaryOp;

use crate::errors::{integer_overflow, invalid_unary_op, EvalResult};
use crate::operators::truthiness;
use crate::Value;

/// Evaluate a unary operation.
///
/// `neg` is defined for `Int` only. `!` takes a `Bool`, or an `Int` read as
/// nonzero-is-true.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> EvalResult {
    match (value, op) {
        (Value::Int(n), UnaryOp::Neg) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        (Value::Bool(_) | Value::Int(_), UnaryOp::Not) => match truthiness(value) {
            Some(b) => Ok(Value::Bool(!b)),
            None => Err(invalid_unary_op(op.as_symbol(), value.type_of())),
        },
        _ => Err(invalid_unary_op(op.as_symbol(), value.type_of())),
    }
}
