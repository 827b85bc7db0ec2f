//! Evaluation modes.
//!
//! `brewc run` interprets against the terminal; tests run with captured I/O
//! and a lower call depth so runaway recursion fails fast.

use crate::io_handler::{buffer_handler, stdio_handler, SharedIoHandler};

/// Default call depth cap for `Interpret` on native targets.
///
/// `stacker` keeps deep recursion from overflowing the native stack; this cap
/// turns runaway recursion into a RUNTIME error before it exhausts memory.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Evaluation mode, selecting I/O and recursion policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Standard mode for `brewc run`: terminal I/O.
    #[default]
    Interpret,
    /// Test execution: captured output, scripted input.
    TestRun,
}

impl EvalMode {
    /// Handler used when the embedder does not supply one.
    pub fn default_io_handler(self) -> SharedIoHandler {
        match self {
            Self::Interpret => stdio_handler(),
            Self::TestRun => buffer_handler(Vec::<String>::new()),
        }
    }

    /// Maximum user call depth.
    ///
    /// - `Interpret`: [`DEFAULT_MAX_CALL_DEPTH`] on native, 200 on WASM
    /// - `TestRun`: always 500
    #[inline]
    pub fn max_recursion_depth(self) -> usize {
        match self {
            Self::Interpret => {
                #[cfg(target_arch = "wasm32")]
                {
                    200
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    DEFAULT_MAX_CALL_DEPTH
                }
            }
            Self::TestRun => 500,
        }
    }
}
