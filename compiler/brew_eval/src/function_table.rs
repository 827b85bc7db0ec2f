//! Top-level function table.
//!
//! Functions are keyed by `(name, arity)`, so one name may be overloaded by
//! parameter count. The table is built once from the program and is not
//! modified while it runs.

use brew_ir::{Name, Program, SharedFunction};
use rustc_hash::FxHashMap;

/// Result of looking a function name up without an arity.
#[derive(Debug)]
pub enum NamedFunction<'t> {
    Missing,
    Unique(&'t SharedFunction),
    Overloaded,
}

#[derive(Debug, Default)]
pub struct FunctionTable {
    functions: FxHashMap<Name, FxHashMap<usize, SharedFunction>>,
}

impl FunctionTable {
    pub fn new() -> Self {
        FunctionTable::default()
    }

    pub fn from_program(program: &Program) -> Self {
        let mut table = FunctionTable::new();
        for func in &program.functions {
            table.register(func.clone());
        }
        table
    }

    /// Index `def` by name and arity. A later definition with the same key
    /// replaces the earlier one.
    pub fn register(&mut self, def: SharedFunction) {
        self.functions
            .entry(def.name)
            .or_default()
            .insert(def.arity(), def);
    }

    #[inline]
    pub fn resolve(&self, name: Name, arity: usize) -> Option<&SharedFunction> {
        self.functions.get(&name)?.get(&arity)
    }

    /// Whether any arity of `name` is defined.
    #[inline]
    pub fn contains(&self, name: Name) -> bool {
        self.functions.contains_key(&name)
    }

    /// The single definition of `name`, for use as a value.
    pub fn sole(&self, name: Name) -> NamedFunction<'_> {
        let Some(overloads) = self.functions.get(&name) else {
            return NamedFunction::Missing;
        };
        let mut defs = overloads.values();
        match (defs.next(), defs.next()) {
            (Some(def), None) => NamedFunction::Unique(def),
            (None, _) => NamedFunction::Missing,
            (Some(_), Some(_)) => NamedFunction::Overloaded,
        }
    }

    pub fn len(&self) -> usize {
        self.functions.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brew_ir::build::AstBuilder;
    use brew_ir::StringInterner;

    #[test]
    fn test_overloads_resolve_by_arity() {
        let interner = StringInterner::new();
        let b = AstBuilder::new(&interner);
        let program = b.program(vec![
            b.func("f", &[], vec![]),
            b.func("f", &["a"], vec![]),
            b.func("g", &["a", "ref b"], vec![]),
        ]);
        let table = FunctionTable::from_program(&program);
        let f = interner.intern("f");
        let g = interner.intern("g");

        assert_eq!(table.len(), 3);
        assert_eq!(table.resolve(f, 1).map(|d| d.arity()), Some(1));
        assert!(table.resolve(f, 2).is_none());
        assert!(table.resolve(g, 2).is_some());
        assert!(table.contains(g));
        assert!(!table.contains(interner.intern("h")));
    }

    #[test]
    fn test_sole_distinguishes_overloads() {
        let interner = StringInterner::new();
        let b = AstBuilder::new(&interner);
        let program = b.program(vec![
            b.func("f", &[], vec![]),
            b.func("f", &["a"], vec![]),
            b.func("g", &["a"], vec![]),
        ]);
        let table = FunctionTable::from_program(&program);

        assert!(matches!(
            table.sole(interner.intern("f")),
            NamedFunction::Overloaded
        ));
        assert!(matches!(
            table.sole(interner.intern("g")),
            NamedFunction::Unique(def) if def.arity() == 1
        ));
        assert!(matches!(
            table.sole(interner.intern("h")),
            NamedFunction::Missing
        ));
    }

    #[test]
    fn test_redefinition_replaces() {
        let interner = StringInterner::new();
        let b = AstBuilder::new(&interner);
        let program = b.program(vec![
            b.func("f", &["a"], vec![]),
            b.func("f", &["b"], vec![b.ret_nothing()]),
        ]);
        let table = FunctionTable::from_program(&program);
        let def = table.resolve(interner.intern("f"), 1);
        assert_eq!(def.map(|d| d.body.len()), Some(1));
    }
}
