//! I/O boundary for the interpreter.
//!
//! `print` output and `read-int`/`read-string` input both go through one
//! handler so a run can be pointed at the terminal or at an in-memory script:
//! - Native: stdout and stdin (default)
//! - Tests: captured output and a queue of scripted input lines
//!
//! Enum dispatch, no trait objects.

use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::Arc;

use parking_lot::Mutex;

/// Handler that writes to stdout and reads from stdin.
#[derive(Default)]
pub struct StdioHandler;

impl StdioHandler {
    /// Write one line of output.
    pub fn output(&self, line: &str) {
        println!("{line}");
    }

    /// Read one line, without its terminator. End of input reads as empty.
    pub fn read_line(&self) -> String {
        let mut line = String::new();
        if let Err(err) = std::io::stdin().lock().read_line(&mut line) {
            tracing::warn!(%err, "failed to read from stdin");
            line.clear();
        }
        trim_line_ending(&mut line);
        line
    }
}

/// Handler that captures output and serves input from a fixed script.
pub struct BufferIoHandler {
    output: Mutex<String>,
    input: Mutex<VecDeque<String>>,
}

impl BufferIoHandler {
    pub fn new() -> Self {
        Self::with_input(Vec::<String>::new())
    }

    /// Create a handler whose reads return `lines` in order.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BufferIoHandler {
            output: Mutex::new(String::new()),
            input: Mutex::new(lines.into_iter().map(Into::into).collect()),
        }
    }

    pub fn output(&self, line: &str) {
        let mut buf = self.output.lock();
        buf.push_str(line);
        buf.push('\n');
    }

    /// Next scripted line, or an empty line once the script is exhausted.
    pub fn read_line(&self) -> String {
        self.input.lock().pop_front().unwrap_or_default()
    }

    pub fn get_output(&self) -> String {
        self.output.lock().clone()
    }
}

impl Default for BufferIoHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// I/O handler implementation using enum dispatch.
pub enum IoHandlerImpl {
    /// Terminal I/O (default).
    Stdio(StdioHandler),
    /// Captured output and scripted input (testing).
    Buffer(BufferIoHandler),
}

impl IoHandlerImpl {
    pub fn output(&self, line: &str) {
        match self {
            Self::Stdio(h) => h.output(line),
            Self::Buffer(h) => h.output(line),
        }
    }

    pub fn read_line(&self) -> String {
        match self {
            Self::Stdio(h) => h.read_line(),
            Self::Buffer(h) => h.read_line(),
        }
    }

    /// Captured output. Always empty for stdio.
    pub fn get_output(&self) -> String {
        match self {
            Self::Stdio(_) => String::new(),
            Self::Buffer(h) => h.get_output(),
        }
    }
}

/// Shared I/O handler that can be passed around.
pub type SharedIoHandler = Arc<IoHandlerImpl>;

/// Create a terminal I/O handler.
pub fn stdio_handler() -> SharedIoHandler {
    Arc::new(IoHandlerImpl::Stdio(StdioHandler))
}

/// Create a buffer handler with scripted input lines.
pub fn buffer_handler<I, S>(input: I) -> SharedIoHandler
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Arc::new(IoHandlerImpl::Buffer(BufferIoHandler::with_input(input)))
}

fn trim_line_ending(line: &mut String) {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
}
