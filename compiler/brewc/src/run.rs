//! The `run` command: load a JSON node tree, lower it and evaluate `main`.

use std::process::ExitCode;

use brew_eval::{ErrorKind, EvalError, EvalMode, InterpreterBuilder};
use brew_ir::{lower_program, LowerError, Node, StringInterner};

use crate::options::RunOptions;

/// Failure before evaluation starts.
#[derive(Debug, thiserror::Error)]
enum LoadError {
    #[error("cannot read `{path}`: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("`{path}` is not a valid node tree: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("malformed program: {0}")]
    Lower(#[from] LowerError),
}

/// Exit status for an evaluation failure.
fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Name => 2,
        ErrorKind::Type => 3,
        ErrorKind::Runtime => 4,
    }
}

fn load_program(path: &str, interner: &StringInterner) -> Result<brew_ir::Program, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_owned(),
        source,
    })?;
    let root: Node = serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_owned(),
        source,
    })?;
    Ok(lower_program(&root, interner)?)
}

fn report_eval_error(err: &EvalError) {
    eprintln!("error[{}]: {}", err.kind(), err.message());
    if !err.backtrace().is_empty() {
        eprintln!("{}", err.format_backtrace());
    }
}

/// Run the program at `options.path` on stdio.
pub fn run_file(options: &RunOptions) -> ExitCode {
    let interner = StringInterner::new();
    let program = match load_program(&options.path, &interner) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };
    tracing::debug!(path = %options.path, functions = program.functions.len(), "loaded program");

    let mut builder = InterpreterBuilder::new(&interner, &program)
        .mode(EvalMode::Interpret)
        .profile(options.profile);
    if let Some(depth) = options.max_depth {
        builder = builder.max_call_depth(depth);
    }
    let mut interpreter = builder.build();
    let result = interpreter.run();

    if let Some(counters) = interpreter.counters() {
        eprintln!("{}", counters.report());
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_eval_error(&err);
            ExitCode::from(exit_code(err.kind()))
        }
    }
}
