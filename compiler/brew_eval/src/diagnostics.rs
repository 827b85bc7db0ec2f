//! Diagnostic infrastructure for the evaluator.
//!
//! - `CallStack`: active user calls, with the depth limit checked on push
//! - `EvalCounters`: optional counters for `--profile`

use brew_ir::{Name, StringInterner};

use crate::errors::{recursion_limit_exceeded, EvalError};

/// Live stack of user function calls.
///
/// Each call pushes the callee's name and pops it on return. Lambdas push
/// [`Name::EMPTY`] and show up as `<lambda>` in backtraces.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<Name>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `max_depth` is `None` for unlimited.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call, failing with a RUNTIME error past the limit. The frame is
    /// not pushed on failure.
    pub fn push(&mut self, name: Name) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(recursion_limit_exceeded(max));
            }
        }
        self.frames.push(name);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Function names of the active calls, outermost first.
    pub fn capture(&self, interner: &StringInterner) -> Vec<String> {
        self.frames
            .iter()
            .map(|&name| {
                if name == Name::EMPTY {
                    "<lambda>".to_owned()
                } else {
                    interner.lookup(name).to_owned()
                }
            })
            .collect()
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Optional performance counters for `--profile`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalCounters {
    pub expressions_evaluated: u64,
    pub statements_executed: u64,
    pub function_calls: u64,
    pub method_calls: u64,
}

impl EvalCounters {
    #[inline]
    pub fn count_expression(&mut self) {
        self.expressions_evaluated = self.expressions_evaluated.wrapping_add(1);
    }

    #[inline]
    pub fn count_statement(&mut self) {
        self.statements_executed = self.statements_executed.wrapping_add(1);
    }

    #[inline]
    pub fn count_function_call(&mut self) {
        self.function_calls = self.function_calls.wrapping_add(1);
    }

    #[inline]
    pub fn count_method_call(&mut self) {
        self.method_calls = self.method_calls.wrapping_add(1);
    }

    pub fn report(&self) -> String {
        format!(
            "Evaluation profile:\n  \
             expressions evaluated: {}\n  \
             statements executed:   {}\n  \
             function calls:        {}\n  \
             method calls:          {}",
            self.expressions_evaluated,
            self.statements_executed,
            self.function_calls,
            self.method_calls,
        )
    }
}
