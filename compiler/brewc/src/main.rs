//! Brew CLI
//!
//! Runs a program given as a JSON node tree:
//!
//! ```text
//! brew run <program.json> [--max-depth=N] [--profile]
//! ```

mod options;
mod run;

use std::process::ExitCode;

use options::parse_run_options;

fn main() -> ExitCode {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    let Some(command) = args.get(1) else {
        print_usage();
        return ExitCode::from(1);
    };

    match command.as_str() {
        "run" => {
            let env_depth = std::env::var("BREW_MAX_DEPTH").ok();
            match parse_run_options(args.get(2..).unwrap_or_default(), env_depth.as_deref()) {
                Ok(options) => run::run_file(&options),
                Err(err) => {
                    eprintln!("error: {err}");
                    eprintln!("Usage: brew run <program.json> [--max-depth=N] [--profile]");
                    ExitCode::from(1)
                }
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        other => {
            eprintln!("unknown command `{other}`");
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    eprintln!("Brew evaluator");
    eprintln!();
    eprintln!("Usage: brew <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <program.json>   Evaluate a program node tree");
    eprintln!();
    eprintln!("Run options:");
    eprintln!("  --max-depth=<n>      Cap user call depth (or set BREW_MAX_DEPTH)");
    eprintln!("  --profile            Print evaluation counters to stderr");
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=brew_eval=debug) for evaluator tracing.");
}

/// Install a hierarchical tracing subscriber when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
            .init();
    }
}
