//! Runtime values.
//!
//! Scalars are copied by value. Closures and objects are shared handles:
//! cloning a [`Value`] never duplicates a function body or a member map.

mod object;

use std::fmt;
use std::rc::Rc;

use brew_ir::SharedFunction;

use crate::environment::CaptureId;

pub use object::{ObjectHandle, PrototypeCycle};

/// Type tag of a [`Value`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Int,
    Bool,
    String,
    Nil,
    Closure,
    Object,
}

impl ValueType {
    pub const fn name(self) -> &'static str {
        match self {
            ValueType::Int => "int",
            ValueType::Bool => "bool",
            ValueType::String => "string",
            ValueType::Nil => "nil",
            ValueType::Closure => "closure",
            ValueType::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A function value: a definition plus the captured environment it runs in.
///
/// `capture` is `None` for top-level functions used as values; calling one of
/// those pushes no captured frame.
#[derive(Debug)]
pub struct ClosureValue {
    pub func: SharedFunction,
    pub capture: Option<CaptureId>,
}

#[derive(Clone, Debug)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(Rc<str>),
    Nil,
    Closure(Rc<ClosureValue>),
    Object(ObjectHandle),
}

impl Value {
    #[inline]
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn closure(func: SharedFunction, capture: Option<CaptureId>) -> Self {
        Value::Closure(Rc::new(ClosureValue { func, capture }))
    }

    pub fn new_object() -> Self {
        Value::Object(ObjectHandle::new())
    }

    pub fn type_of(&self) -> ValueType {
        match self {
            Value::Int(_) => ValueType::Int,
            Value::Bool(_) => ValueType::Bool,
            Value::Str(_) => ValueType::String,
            Value::Nil => ValueType::Nil,
            Value::Closure(_) => ValueType::Closure,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Structural equality for scalars, identity for closures and objects.
    ///
    /// Values of different types are never equal. Coercion between `Int` and
    /// `Bool` is the operator layer's job, not this one.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Text written by `print`. `None` for closures and objects.
    pub fn display_string(&self) -> Option<String> {
        match self {
            Value::Int(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Str(s) => Some(s.to_string()),
            Value::Nil => Some("nil".to_owned()),
            Value::Closure(_) | Value::Object(_) => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}
