//! Member access and prototype links.
//!
//! `o.proto` is not a member: reading it yields the prototype (or nil) and
//! writing it relinks the chain.

use brew_ir::Name;

use super::Interpreter;
use crate::errors::{
    invalid_prototype, not_an_object, prototype_cycle, undefined_member, undefined_variable,
    EvalError, EvalResult,
};
use crate::value::ObjectHandle;
use crate::Value;

impl Interpreter<'_> {
    /// The object held by variable `name`.
    pub(super) fn object_named(&self, name: Name) -> Result<ObjectHandle, EvalError> {
        match self.env.lookup(name) {
            Some(Value::Object(object)) => Ok(object),
            Some(other) => Err(not_an_object(self.name_str(name), other.type_of())),
            None => Err(undefined_variable(self.name_str(name))),
        }
    }

    /// Evaluate `object.field`, searching the prototype chain.
    pub(super) fn get_member(&self, object: Name, field: Name) -> EvalResult {
        let handle = self.object_named(object)?;
        if field == self.names.proto {
            return Ok(handle.proto().map_or(Value::Nil, Value::Object));
        }
        handle
            .get_member(field)
            .ok_or_else(|| undefined_member(self.name_str(object), self.name_str(field)))
    }

    /// Execute `object.field = value`. Writes go to the object's own members.
    pub(super) fn set_member(&mut self, object: Name, field: Name, value: Value) -> Result<(), EvalError> {
        let handle = self.object_named(object)?;
        if field != self.names.proto {
            handle.set_member(field, value);
            return Ok(());
        }
        let proto = match value {
            Value::Object(proto) => Some(proto),
            Value::Nil => None,
            other => return Err(invalid_prototype(other.type_of())),
        };
        handle
            .set_proto(proto)
            .map_err(|_| prototype_cycle(self.name_str(object)))
    }
}
