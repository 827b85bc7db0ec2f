//! Names interned once at interpreter construction, so dispatch on them is a
//! `u32` comparison.

use brew_ir::{Name, StringInterner};

/// Built-in functions callable by name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Builtin {
    Print,
    ReadInt,
    ReadString,
}

#[derive(Clone, Copy)]
pub(crate) struct BuiltinNames {
    pub(crate) print: Name,
    pub(crate) read_int: Name,
    pub(crate) read_string: Name,
    /// Older spellings of `read-int` and `read-string`.
    pub(crate) inputi: Name,
    pub(crate) inputs: Name,
    pub(crate) this: Name,
    pub(crate) proto: Name,
    pub(crate) main: Name,
}

impl BuiltinNames {
    pub(crate) fn new(interner: &StringInterner) -> Self {
        Self {
            print: interner.intern("print"),
            read_int: interner.intern("read-int"),
            read_string: interner.intern("read-string"),
            inputi: interner.intern("inputi"),
            inputs: interner.intern("inputs"),
            this: interner.intern("this"),
            proto: interner.intern("proto"),
            main: interner.intern("main"),
        }
    }

    pub(crate) fn builtin(&self, name: Name) -> Option<Builtin> {
        if name == self.print {
            Some(Builtin::Print)
        } else if name == self.read_int || name == self.inputi {
            Some(Builtin::ReadInt)
        } else if name == self.read_string || name == self.inputs {
            Some(Builtin::ReadString)
        } else {
            None
        }
    }
}
