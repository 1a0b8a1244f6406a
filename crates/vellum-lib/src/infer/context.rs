//! Lexical scope of a traversal.

use std::collections::HashMap;

use crate::shape::ShapeId;

/// Loop variables in scope plus the module root.
///
/// Cloned when entering a loop body, so bindings never leak to siblings.
/// The handles are shared with the tree, not copies of its nodes.
#[derive(Debug, Clone)]
pub struct Context {
    module: ShapeId,
    bindings: HashMap<String, ShapeId>,
}

impl Context {
    pub fn new(module: ShapeId) -> Self {
        Self {
            module,
            bindings: HashMap::new(),
        }
    }

    pub fn module(&self) -> ShapeId {
        self.module
    }

    pub fn lookup(&self, name: &str) -> Option<ShapeId> {
        self.bindings.get(name).copied()
    }

    /// Returns a child scope with `name` bound to `id`.
    pub fn with_binding(&self, name: impl Into<String>, id: ShapeId) -> Self {
        let mut scope = self.clone();
        scope.bindings.insert(name.into(), id);
        scope
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }
}
