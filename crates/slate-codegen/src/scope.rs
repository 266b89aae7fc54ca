//! Scope bookkeeping during lowering.
//!
//! Scopes are flat: one per function body plus one for the module
//! entry, each with its own name table. Lookup never chains to an
//! outer scope. Every operation except `push` requires an active
//! scope; underflow is a bug in lowering and panics.

use std::collections::HashMap;

use slate_ir::{BlockId, Value};

/// One lowering scope: the block instructions go to, the names bound
/// so far, and the pending return value.
#[derive(Debug)]
pub(crate) struct Scope {
    block: BlockId,
    locals: HashMap<String, Value>,
    return_value: Option<Value>,
}

/// Last-in-first-out stack of scopes. Pushes and pops are balanced
/// over a successful lowering, leaving the stack empty at the end.
#[derive(Debug, Default)]
pub(crate) struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Opens a scope targeting `block`.
    pub(crate) fn push(&mut self, block: BlockId) {
        self.scopes.push(Scope {
            block,
            locals: HashMap::new(),
            return_value: None,
        });
    }

    /// Closes the current scope, discarding its bindings.
    ///
    /// # Panics
    ///
    /// Panics when no scope is active.
    pub(crate) fn pop(&mut self) {
        if self.scopes.pop().is_none() {
            panic!("no active scope");
        }
    }

    /// Returns the block instructions are currently appended to.
    ///
    /// # Panics
    ///
    /// Panics when no scope is active; lowering opens the entry scope
    /// before emitting anything.
    #[must_use]
    pub(crate) fn current_block(&self) -> BlockId {
        self.top().block
    }

    /// Binds `name` in the current scope, overwriting any previous
    /// binding of the same name.
    pub(crate) fn bind(&mut self, name: String, storage: Value) {
        self.top_mut().locals.insert(name, storage);
    }

    /// Looks up a name in the current scope only.
    #[must_use]
    pub(crate) fn lookup(&self, name: &str) -> Option<Value> {
        self.top().locals.get(name).copied()
    }

    /// Sets the current scope's pending return value.
    pub(crate) fn set_return_value(&mut self, value: Option<Value>) {
        self.top_mut().return_value = value;
    }

    /// Reads the current scope's pending return value.
    #[must_use]
    pub(crate) fn return_value(&self) -> Option<Value> {
        self.top().return_value
    }

    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    fn top(&self) -> &Scope {
        match self.scopes.last() {
            Some(scope) => scope,
            None => panic!("no active scope"),
        }
    }

    fn top_mut(&mut self) -> &mut Scope {
        match self.scopes.last_mut() {
            Some(scope) => scope,
            None => panic!("no active scope"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_top_scope_only() {
        let mut scopes = ScopeStack::new();
        scopes.push(BlockId(0));
        scopes.bind("x".to_string(), Value::ConstInt(1));

        scopes.push(BlockId(1));
        assert_eq!(scopes.lookup("x"), None);

        scopes.pop();
        assert_eq!(scopes.lookup("x"), Some(Value::ConstInt(1)));
    }

    #[test]
    fn test_bind_overwrites() {
        let mut scopes = ScopeStack::new();
        scopes.push(BlockId(0));
        scopes.bind("x".to_string(), Value::ConstInt(1));
        scopes.bind("x".to_string(), Value::ConstInt(2));

        assert_eq!(scopes.lookup("x"), Some(Value::ConstInt(2)));
    }

    #[test]
    fn test_return_value_is_per_scope() {
        let mut scopes = ScopeStack::new();
        scopes.push(BlockId(0));
        scopes.set_return_value(Some(Value::ConstInt(7)));

        scopes.push(BlockId(1));
        assert_eq!(scopes.return_value(), None);
        scopes.pop();

        assert_eq!(scopes.return_value(), Some(Value::ConstInt(7)));
        scopes.pop();
        assert!(scopes.is_empty());
    }

    #[test]
    fn test_current_block_tracks_top() {
        let mut scopes = ScopeStack::new();
        scopes.push(BlockId(0));
        scopes.push(BlockId(3));
        assert_eq!(scopes.current_block(), BlockId(3));
        scopes.pop();
        assert_eq!(scopes.current_block(), BlockId(0));
        assert!(!scopes.is_empty());
    }

    #[test]
    #[should_panic(expected = "no active scope")]
    fn test_pop_on_empty_stack_panics() {
        ScopeStack::new().pop();
    }

    #[test]
    #[should_panic(expected = "no active scope")]
    fn test_bind_on_empty_stack_panics() {
        ScopeStack::new().bind("x".to_string(), Value::ConstInt(1));
    }

    #[test]
    #[should_panic(expected = "no active scope")]
    fn test_set_return_value_on_empty_stack_panics() {
        ScopeStack::new().set_return_value(Some(Value::ConstInt(1)));
    }
}
