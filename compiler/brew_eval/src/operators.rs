//! Binary operator implementations for the evaluator.
//!
//! Operands are coerced first (see [`coerce_operands`]) and then dispatched on
//! their type pair by direct pattern matching. An operator that the resolved
//! type does not define is a TYPE error.

use brew_ir::BinaryOp;

use crate::errors::{
    binary_type_mismatch, division_by_zero, integer_overflow, invalid_binary_op,
    invalid_coercion, EvalError, EvalResult,
};
use crate::value::ValueType;
use crate::Value;

/// Boolean reading of a value: `Bool` as is, `Int` nonzero is true.
#[inline]
pub fn truthiness(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Int(n) => Some(*n != 0),
        _ => None,
    }
}

fn to_bool(value: &Value) -> Result<Value, EvalError> {
    truthiness(value)
        .map(Value::Bool)
        .ok_or_else(|| invalid_coercion(value.type_of(), ValueType::Bool))
}

fn to_int(value: &Value) -> Result<Value, EvalError> {
    match value {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        other => Err(invalid_coercion(other.type_of(), ValueType::Int)),
    }
}

/// Apply the implicit conversions, in order:
///
/// 1. `&&` and `||` convert both operands to `Bool`.
/// 2. `==` and `!=` between an `Int` and a `Bool` convert both to `Bool`.
/// 3. `+ - * /` with a `Bool` operand convert both to `Int`.
///
/// Anything else is passed through unchanged.
pub fn coerce_operands(left: Value, right: Value, op: BinaryOp) -> Result<(Value, Value), EvalError> {
    if op.is_logical() {
        return Ok((to_bool(&left)?, to_bool(&right)?));
    }
    let mixed_int_bool = matches!(
        (&left, &right),
        (Value::Int(_), Value::Bool(_)) | (Value::Bool(_), Value::Int(_))
    );
    if op.is_equality() && mixed_int_bool {
        return Ok((to_bool(&left)?, to_bool(&right)?));
    }
    if op.is_arithmetic() && (matches!(left, Value::Bool(_)) || matches!(right, Value::Bool(_))) {
        return Ok((to_int(&left)?, to_int(&right)?));
    }
    Ok((left, right))
}

/// Evaluate a binary operation after coercion.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    let (left, right) = coerce_operands(left, right, op)?;
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(*a, *b, op),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, b, op),
        // Nil, closures, objects and mixed types only compare for equality.
        _ if op.is_equality() => {
            let equal = left.equals(&right);
            Ok(Value::Bool(if op == BinaryOp::Eq { equal } else { !equal }))
        }
        _ if left.type_of() == right.type_of() => Err(invalid_binary_op(op, left.type_of())),
        _ => Err(binary_type_mismatch(op, left.type_of(), right.type_of())),
    }
}

/// Division rounding toward negative infinity.
///
/// `None` on a zero divisor or overflow (`i64::MIN / -1`).
pub fn floor_div(a: i64, b: i64) -> Option<i64> {
    let quotient = a.checked_div(b)?;
    let remainder = a.checked_rem(b)?;
    if remainder != 0 && ((remainder < 0) != (b < 0)) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}

#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                checked_arith(floor_div(a, b), "division")
            }
        }
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        BinaryOp::And | BinaryOp::Or => Err(invalid_binary_op(op, ValueType::Int)),
    }
}

fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::And => Ok(Value::Bool(a && b)),
        BinaryOp::Or => Ok(Value::Bool(a || b)),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        _ => Err(invalid_binary_op(op, ValueType::Bool)),
    }
}

fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len().saturating_add(b.len()));
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::string(joined))
        }
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        _ => Err(invalid_binary_op(op, ValueType::String)),
    }
}
