//! Evaluator tests.
//!
//! Program-level tests build ASTs with `brew_ir::build`, run them in
//! `EvalMode::TestRun` and assert on captured output or on the error kind.

mod builtin_tests;
mod program_tests;

use brew_ir::build::AstBuilder;
use brew_ir::{Program, SharedFunction, Stmt, StringInterner};

use crate::{buffer_handler, ErrorKind, EvalError, EvalMode, InterpreterBuilder};

/// Run `program` with no scripted input, returning its output.
pub(crate) fn run(interner: &StringInterner, program: &Program) -> Result<String, EvalError> {
    run_with_input(interner, program, &[])
}

pub(crate) fn run_with_input(
    interner: &StringInterner,
    program: &Program,
    input: &[&str],
) -> Result<String, EvalError> {
    let mut interp = InterpreterBuilder::new(interner, program)
        .mode(EvalMode::TestRun)
        .io_handler(buffer_handler(input.iter().copied()))
        .build();
    interp.run()?;
    Ok(interp.get_output())
}

/// Kind of the error `program` fails with; panics if it succeeds.
pub(crate) fn run_err(interner: &StringInterner, program: &Program) -> ErrorKind {
    match run(interner, program) {
        Ok(output) => panic!("expected failure, got output {output:?}"),
        Err(err) => err.kind(),
    }
}

/// A program consisting of `main` with `body` plus `helpers`.
pub(crate) fn with_main(b: &AstBuilder<'_>, body: Vec<Stmt>, helpers: Vec<SharedFunction>) -> Program {
    let mut functions = vec![b.func("main", &[], body)];
    functions.extend(helpers);
    b.program(functions)
}
