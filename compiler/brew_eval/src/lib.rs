#![deny(clippy::arithmetic_side_effects)]
//! Brew Eval - tree-walking evaluator for Brew programs.
//!
//! # Architecture
//!
//! - [`Value`]: runtime values; closures and objects are shared handles
//! - [`Environment`]: frame stack with reference parameters and an arena of
//!   captured environments shared by alias groups
//! - [`FunctionTable`]: top-level functions keyed by `(name, arity)`
//! - `evaluate_binary` / `evaluate_unary`: coercion plus direct enum dispatch
//! - [`Interpreter`]: statement executor and expression evaluator
//!
//! Every failure is an [`EvalError`] of kind NAME, TYPE or RUNTIME, built by
//! the constructors in [`errors`].

pub mod diagnostics;
mod environment;
pub mod errors;
mod eval_mode;
mod function_table;
pub mod interpreter;
mod io_handler;
mod operators;
mod unary_operators;
mod value;

pub use diagnostics::{CallStack, EvalCounters};
pub use environment::{CaptureId, CaptureSource, Environment, Snapshot};
pub use errors::{ErrorKind, EvalError, EvalResult};
pub use eval_mode::{EvalMode, DEFAULT_MAX_CALL_DEPTH};
pub use function_table::{FunctionTable, NamedFunction};
pub use interpreter::{ExecOutcome, Interpreter, InterpreterBuilder, ScopedInterpreter};
pub use io_handler::{
    buffer_handler, stdio_handler, BufferIoHandler, IoHandlerImpl, SharedIoHandler, StdioHandler,
};
pub use operators::{coerce_operands, evaluate_binary, floor_div, truthiness};
pub use unary_operators::evaluate_unary;
pub use value::{ClosureValue, ObjectHandle, PrototypeCycle, Value, ValueType};

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
