//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use brew_ir::{Program, StringInterner};

use super::interned_names::BuiltinNames;
use super::Interpreter;
use crate::diagnostics::{CallStack, EvalCounters};
use crate::eval_mode::EvalMode;
use crate::function_table::FunctionTable;
use crate::io_handler::SharedIoHandler;
use crate::Environment;

/// Builder for creating Interpreter instances.
///
/// The default mode is `Interpret`; tests should pass `EvalMode::TestRun`.
pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    program: &'a Program,
    mode: EvalMode,
    io_handler: Option<SharedIoHandler>,
    max_call_depth: Option<usize>,
    profile: bool,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(interner: &'a StringInterner, program: &'a Program) -> Self {
        Self {
            interner,
            program,
            mode: EvalMode::default(),
            io_handler: None,
            max_call_depth: None,
            profile: false,
        }
    }

    /// Set the evaluation mode. Controls the default I/O handler and
    /// recursion limit.
    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the I/O handler. Overrides the mode-based default.
    #[must_use]
    pub fn io_handler(mut self, handler: SharedIoHandler) -> Self {
        self.io_handler = Some(handler);
        self
    }

    /// Cap user call depth. Overrides the mode-based limit.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    /// Collect evaluation counters.
    #[must_use]
    pub fn profile(mut self, enabled: bool) -> Self {
        self.profile = enabled;
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        let max_depth = self
            .max_call_depth
            .unwrap_or_else(|| self.mode.max_recursion_depth());
        Interpreter {
            interner: self.interner,
            functions: FunctionTable::from_program(self.program),
            env: Environment::new(),
            io: self
                .io_handler
                .unwrap_or_else(|| self.mode.default_io_handler()),
            mode: self.mode,
            call_stack: CallStack::new(Some(max_depth)),
            names: BuiltinNames::new(self.interner),
            counters: self.profile.then(EvalCounters::default),
        }
    }
}
