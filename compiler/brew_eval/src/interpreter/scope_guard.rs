//! RAII frame guards for Interpreter environment management.
//!
//! [`ScopedInterpreter`] pops the slot it pushed when dropped, including on an
//! early `?` return or during unwinding. It derefs to the interpreter, so a
//! guard is used exactly like the interpreter itself and guards nest.
//!
//! ```text
//! self.with_env_scope(|scoped| {
//!     scoped.env.declare(name, value);
//!     scoped.exec_statements(body)
//! })
//! ```

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::environment::CaptureId;

/// RAII guard that pops one environment slot on drop.
pub struct ScopedInterpreter<'guard, 'interp> {
    interpreter: &'guard mut Interpreter<'interp>,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_frame();
    }
}

impl<'interp> Deref for ScopedInterpreter<'_, 'interp> {
    type Target = Interpreter<'interp>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'a> Interpreter<'a> {
    /// Push an empty frame, popped when the guard drops.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_, 'a> {
        self.env.push_frame();
        ScopedInterpreter { interpreter: self }
    }

    /// Push a closure's captured environment, popped when the guard drops.
    pub fn scoped_capture(&mut self, id: CaptureId) -> ScopedInterpreter<'_, 'a> {
        self.env.push_captured(id);
        ScopedInterpreter { interpreter: self }
    }

    /// Run `f` inside a new frame.
    pub fn with_env_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_, 'a>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }

    /// Run `f` inside a call's frames: the captured environment when there is
    /// one, then a fresh parameter frame.
    pub fn with_call_frames<T, F>(&mut self, capture: Option<CaptureId>, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_, 'a>) -> T,
    {
        match capture {
            Some(id) => {
                let mut captured = self.scoped_capture(id);
                captured.with_env_scope(f)
            }
            None => self.with_env_scope(f),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use crate::eval_mode::EvalMode;
    use crate::environment::CaptureSource;
    use crate::interpreter::InterpreterBuilder;
    use crate::Value;
    use brew_ir::{Program, StringInterner};

    #[test]
    fn test_guard_pops_on_drop() {
        let interner = StringInterner::new();
        let program = Program::default();
        let mut interp = InterpreterBuilder::new(&interner, &program)
            .mode(EvalMode::TestRun)
            .build();
        let base = interp.env.depth();
        {
            let mut scoped = interp.scoped();
            scoped.env.declare(interner.intern("x"), Value::Int(1));
            let _inner = scoped.scoped();
        }
        assert_eq!(interp.env.depth(), base);
        assert!(!interp.env.is_bound(interner.intern("x")));
    }

    #[test]
    fn test_early_error_still_pops() {
        let interner = StringInterner::new();
        let program = Program::default();
        let mut interp = InterpreterBuilder::new(&interner, &program)
            .mode(EvalMode::TestRun)
            .build();
        let base = interp.env.depth();
        let result: Result<(), &str> = interp.with_env_scope(|scoped| {
            scoped.env.declare(interner.intern("y"), Value::Nil);
            Err("boom")
        });
        assert!(result.is_err());
        assert_eq!(interp.env.depth(), base);
    }

    #[test]
    fn test_call_frames_push_two_slots() {
        let interner = StringInterner::new();
        let program = Program::default();
        let mut interp = InterpreterBuilder::new(&interner, &program)
            .mode(EvalMode::TestRun)
            .build();
        let base = interp.env.depth();
        let id = interp
            .env
            .register_alias_group(&[], CaptureSource::Snapshot(Default::default()))
            .unwrap();
        let depth_inside = interp.with_call_frames(Some(id), |scoped| scoped.env.depth());
        assert_eq!(depth_inside, base.saturating_add(2));
        assert_eq!(interp.env.depth(), base);
    }
}
