//! Variable environment: a stack of frames plus an arena of captured
//! environments.
//!
//! Scoping is dynamic. A call pushes its frames on top of the caller's, so a
//! callee sees every binding below it, and each statement list gets its own
//! frame. Frames are pushed and popped, never copied.
//!
//! Closures do not own their environment. A lambda's snapshot lives in the
//! arena and the closure holds a [`CaptureId`]; every variable holding that
//! closure (its alias group) shares the one captured environment, and calling
//! the closure pushes the captured environment as a slot of the stack.
//!
//! The arena only grows. Captured environments are never freed during a run,
//! so every lambda evaluated (in a loop, say) keeps its flattened snapshot
//! until the program ends. Allocating past the `u32` id space is a RUNTIME
//! error.

use brew_ir::Name;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::errors::{capture_limit_exceeded, EvalError};
use crate::Value;

/// Handle to a captured environment in the arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CaptureId(u32);

impl CaptureId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Flattened copy of the visible bindings.
pub type Snapshot = FxHashMap<Name, Value>;

/// Where an alias group's captured environment comes from.
#[derive(Debug)]
pub enum CaptureSource {
    /// Start a new captured environment from a snapshot.
    Snapshot(Snapshot),
    /// Join a group that already exists.
    Existing(CaptureId),
}

/// Back-link from a reference parameter to the caller variable it aliases.
///
/// The caller variable is resolved in the `depth` slots that existed when the
/// call was made.
#[derive(Copy, Clone, Debug)]
struct Reference {
    target: Name,
    depth: usize,
}

#[derive(Default, Debug)]
struct Frame {
    bindings: FxHashMap<Name, Value>,
    references: FxHashMap<Name, Reference>,
}

#[derive(Debug)]
struct CapturedEnv {
    bindings: FxHashMap<Name, Value>,
    /// Variable names sharing this environment.
    aliases: SmallVec<[Name; 2]>,
}

#[derive(Debug)]
enum Slot {
    Local(Frame),
    Captured(CaptureId),
}

pub struct Environment {
    slots: Vec<Slot>,
    captures: Vec<CapturedEnv>,
    capture_limit: usize,
}

impl Environment {
    /// Create an environment holding one base frame.
    pub fn new() -> Self {
        Environment {
            slots: vec![Slot::Local(Frame::default())],
            captures: Vec::new(),
            capture_limit: usize::MAX,
        }
    }

    /// An environment that holds at most `limit` captured environments.
    #[cfg(test)]
    pub(crate) fn with_capture_limit(limit: usize) -> Self {
        Environment {
            capture_limit: limit,
            ..Environment::new()
        }
    }

    /// Number of slots on the stack, base frame included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn push_frame(&mut self) {
        self.slots.push(Slot::Local(Frame::default()));
        tracing::trace!(depth = self.slots.len(), "push frame");
    }

    /// Push a captured environment so its bindings shadow everything below.
    pub fn push_captured(&mut self, id: CaptureId) {
        self.slots.push(Slot::Captured(id));
        tracing::trace!(depth = self.slots.len(), capture = id.0, "push captured");
    }

    /// Pop the innermost slot. The base frame is never popped.
    #[inline]
    pub fn pop_frame(&mut self) {
        if self.slots.len() > 1 {
            self.slots.pop();
            tracing::trace!(depth = self.slots.len(), "pop frame");
        }
    }

    /// Create or overwrite `name` in the innermost slot.
    pub fn declare(&mut self, name: Name, value: Value) {
        let Some(slot) = self.slots.last_mut() else {
            return;
        };
        match slot {
            Slot::Local(frame) => {
                frame.bindings.insert(name, value);
            }
            Slot::Captured(id) => {
                if let Some(env) = self.captures.get_mut(id.index()) {
                    env.bindings.insert(name, value);
                }
            }
        }
    }

    /// Innermost binding of `name`.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.slots
            .iter()
            .rev()
            .find_map(|slot| self.slot_bindings(slot)?.get(&name))
            .cloned()
    }

    #[inline]
    pub fn is_bound(&self, name: Name) -> bool {
        self.find_slot(name, self.slots.len()).is_some()
    }

    /// Update the innermost binding of `name`, or declare it in the innermost
    /// slot when it is bound nowhere.
    ///
    /// If the updated binding is a reference parameter the write is repeated
    /// on the caller variable it aliases, transitively.
    pub fn assign(&mut self, name: Name, value: Value) {
        let Some(mut index) = self.find_slot(name, self.slots.len()) else {
            self.declare(name, value);
            return;
        };
        let mut target = name;
        while let Some(reference) = self.write_slot(index, target, value.clone()) {
            tracing::trace!(from = ?target, to = ?reference.target, "propagate reference write");
            match self.find_slot(reference.target, reference.depth.min(index)) {
                Some(next) => {
                    index = next;
                    target = reference.target;
                }
                None => return,
            }
        }
    }

    /// Mark `param`, already declared in the innermost frame, as aliasing
    /// `caller_symbol` in the caller's `caller_frames` slots.
    pub fn bind_reference_param(&mut self, param: Name, caller_symbol: Name, caller_frames: usize) {
        if let Some(Slot::Local(frame)) = self.slots.last_mut() {
            frame.references.insert(
                param,
                Reference {
                    target: caller_symbol,
                    depth: caller_frames,
                },
            );
        }
    }

    /// Copy of every visible binding, the innermost binding of each name
    /// winning.
    pub fn flatten(&self) -> Snapshot {
        let mut snapshot = Snapshot::default();
        for bindings in self.slots.iter().rev().filter_map(|s| self.slot_bindings(s)) {
            for (name, value) in bindings {
                snapshot.entry(*name).or_insert_with(|| value.clone());
            }
        }
        snapshot
    }

    /// Add `names` to an alias group, creating the group's captured
    /// environment when `source` is a snapshot.
    pub fn register_alias_group(
        &mut self,
        names: &[Name],
        source: CaptureSource,
    ) -> Result<CaptureId, EvalError> {
        let id = match source {
            CaptureSource::Snapshot(bindings) => self.alloc(bindings)?,
            CaptureSource::Existing(id) => id,
        };
        if let Some(env) = self.captures.get_mut(id.index()) {
            for name in names {
                if !env.aliases.contains(name) {
                    env.aliases.push(*name);
                }
            }
        }
        tracing::debug!(capture = id.0, aliases = names.len(), "register alias group");
        Ok(id)
    }

    /// Copy a captured environment into a new, unaliased one.
    pub fn fork_capture(&mut self, id: CaptureId) -> Result<CaptureId, EvalError> {
        let bindings = self
            .captures
            .get(id.index())
            .map(|env| env.bindings.clone())
            .unwrap_or_default();
        self.alloc(bindings)
    }

    /// Most recently created group that `name` belongs to.
    pub fn find_group(&self, name: Name) -> Option<CaptureId> {
        self.captures
            .iter()
            .rposition(|env| env.aliases.contains(&name))
            .and_then(|index| u32::try_from(index).ok())
            .map(CaptureId)
    }

    pub fn group_members(&self, id: CaptureId) -> &[Name] {
        self.captures
            .get(id.index())
            .map_or(&[], |env| env.aliases.as_slice())
    }

    /// A binding inside a captured environment.
    pub fn captured_value(&self, id: CaptureId, name: Name) -> Option<Value> {
        self.captures
            .get(id.index())
            .and_then(|env| env.bindings.get(&name))
            .cloned()
    }

    fn alloc(&mut self, bindings: Snapshot) -> Result<CaptureId, EvalError> {
        let count = self.captures.len();
        let id = u32::try_from(count)
            .ok()
            .filter(|_| count < self.capture_limit)
            .map(CaptureId)
            .ok_or_else(|| capture_limit_exceeded(count))?;
        self.captures.push(CapturedEnv {
            bindings,
            aliases: SmallVec::new(),
        });
        Ok(id)
    }

    fn slot_bindings<'s>(&'s self, slot: &'s Slot) -> Option<&'s FxHashMap<Name, Value>> {
        match slot {
            Slot::Local(frame) => Some(&frame.bindings),
            Slot::Captured(id) => self.captures.get(id.index()).map(|env| &env.bindings),
        }
    }

    /// Index of the innermost slot below `limit` that binds `name`.
    fn find_slot(&self, name: Name, limit: usize) -> Option<usize> {
        let end = limit.min(self.slots.len());
        self.slots
            .get(..end)?
            .iter()
            .rposition(|slot| {
                self.slot_bindings(slot)
                    .is_some_and(|bindings| bindings.contains_key(&name))
            })
    }

    /// Overwrite `name` in slot `index`, returning the reference to follow.
    fn write_slot(&mut self, index: usize, name: Name, value: Value) -> Option<Reference> {
        match self.slots.get_mut(index)? {
            Slot::Local(frame) => {
                frame.bindings.insert(name, value);
                frame.references.get(&name).copied()
            }
            Slot::Captured(id) => {
                if let Some(env) = self.captures.get_mut(id.index()) {
                    env.bindings.insert(name, value);
                }
                None
            }
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
