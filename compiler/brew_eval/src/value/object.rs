//! Prototype-chained objects.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use brew_ir::Name;
use rustc_hash::FxHashMap;

use super::Value;

#[derive(Default)]
struct ObjectData {
    members: FxHashMap<Name, Value>,
    proto: Option<ObjectHandle>,
}

/// Shared handle to a mutable object.
///
/// Clones alias the same object. Equality is identity.
#[derive(Clone, Default)]
pub struct ObjectHandle(Rc<RefCell<ObjectData>>);

/// Returned by [`ObjectHandle::set_proto`] when the new link would close a loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PrototypeCycle;

impl ObjectHandle {
    pub fn new() -> Self {
        ObjectHandle::default()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &ObjectHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Look `name` up on this object, then along the prototype chain.
    pub fn get_member(&self, name: Name) -> Option<Value> {
        let mut current = self.clone();
        loop {
            let next = {
                let data = current.0.borrow();
                if let Some(value) = data.members.get(&name) {
                    return Some(value.clone());
                }
                data.proto.clone()?
            };
            current = next;
        }
    }

    /// Write an own member. Prototypes are never written through.
    pub fn set_member(&self, name: Name, value: Value) {
        self.0.borrow_mut().members.insert(name, value);
    }

    pub fn proto(&self) -> Option<ObjectHandle> {
        self.0.borrow().proto.clone()
    }

    /// Replace the prototype link; `None` detaches it.
    ///
    /// Walks the new prototype's chain first, so the cost is linear in its
    /// length. On a cycle the link is left unchanged.
    pub fn set_proto(&self, proto: Option<ObjectHandle>) -> Result<(), PrototypeCycle> {
        let mut cursor = proto.clone();
        while let Some(ancestor) = cursor {
            if ancestor.ptr_eq(self) {
                return Err(PrototypeCycle);
            }
            cursor = ancestor.proto();
        }
        tracing::trace!(detached = proto.is_none(), "set prototype");
        self.0.borrow_mut().proto = proto;
        Ok(())
    }

    pub fn own_member_count(&self) -> usize {
        self.0.borrow().members.len()
    }
}

impl fmt::Debug for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Members may reference this object again; print the address only.
        write!(f, "Object({:p})", Rc::as_ptr(&self.0))
    }
}
