//! Tree-walking interpreter for Brew.
//!
//! # Layout
//!
//! - `exec.rs` - statements and block frames
//! - `expr.rs` - expressions and identifier resolution
//! - `function_call.rs` - call resolution, argument binding, method calls
//! - `objects.rs` - member access and prototype links
//! - `builtins.rs` - `print`, `read-int`, `read-string`
//! - `scope_guard.rs` - RAII frame management
//!
//! # Frames
//!
//! A call to a user function pushes, on top of the caller's stack:
//! the closure's captured environment (if any), a parameter frame and the
//! body's block frame. Every `if` and `while` body gets its own frame too.
//! All pushes go through [`ScopedInterpreter`], so every exit path pops.

mod builder;
mod builtins;
mod exec;
mod expr;
mod function_call;
mod interned_names;
mod objects;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use brew_ir::StringInterner;

use crate::diagnostics::{CallStack, EvalCounters};
use crate::errors::{missing_entry_point, EvalError};
use crate::eval_mode::EvalMode;
use crate::function_table::FunctionTable;
use crate::io_handler::SharedIoHandler;
use crate::{Environment, Value};

use interned_names::BuiltinNames;

/// How a statement list finished.
#[derive(Clone, Debug, PartialEq)]
pub enum ExecOutcome {
    /// Fell through the end.
    Continue,
    /// Hit a `return`; unwinds to the enclosing call.
    Return(Value),
}

/// Tree-walking interpreter.
pub struct Interpreter<'a> {
    pub(crate) interner: &'a StringInterner,
    pub(crate) functions: FunctionTable,
    pub(crate) env: Environment,
    pub(crate) io: SharedIoHandler,
    pub(crate) mode: EvalMode,
    pub(crate) call_stack: CallStack,
    pub(crate) names: BuiltinNames,
    pub(crate) counters: Option<EvalCounters>,
}

impl<'a> Interpreter<'a> {
    /// Run the program's zero-argument `main`.
    ///
    /// A missing `main` fails before any statement runs. `main`'s return
    /// value is discarded.
    pub fn run(&mut self) -> Result<(), EvalError> {
        let main = self.names.main;
        let Some(entry) = self.functions.resolve(main, 0).cloned() else {
            return Err(missing_entry_point(self.interner.lookup(main)));
        };
        tracing::debug!(functions = self.functions.len(), mode = ?self.mode, "run main");
        self.call_function(&entry, None, &[], None).map(|_| ())
    }

    /// Output captured by a buffer I/O handler.
    pub fn get_output(&self) -> String {
        self.io.get_output()
    }

    /// Profile counters, when enabled on the builder.
    pub fn counters(&self) -> Option<&EvalCounters> {
        self.counters.as_ref()
    }

    #[inline]
    pub(crate) fn profile(&mut self, bump: fn(&mut EvalCounters)) {
        if let Some(counters) = self.counters.as_mut() {
            bump(counters);
        }
    }

    #[inline]
    pub(crate) fn name_str(&self, name: brew_ir::Name) -> &'a str {
        self.interner.lookup(name)
    }
}
