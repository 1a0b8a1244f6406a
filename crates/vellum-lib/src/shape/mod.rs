//! The inferred data shape of a template.
//!
//! A [`ShapeTree`] is an arena of [`ShapeNode`]s addressed by [`ShapeId`].
//! Node 0 is always the `Module` root. A node can be reachable both from the
//! root and from a loop variable during inference; both hold the same id.
//!
//! Each node maps names to children in insertion order. A `None` child is a
//! bare value copied through unrendered; it only occurs under the `Module`.

mod merge;
mod printer;
mod serialize;

#[cfg(test)]
mod merge_tests;

use indexmap::IndexMap;

pub use merge::MergeError;
pub use printer::ShapePrinter;
pub use serialize::SerializedShape;

/// Handle to a node inside a [`ShapeTree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct ShapeId(u32);

impl ShapeId {
    /// The `Module` root of every tree.
    pub const ROOT: ShapeId = ShapeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ShapeKind {
    /// Top-level variables of the template.
    Module,
    /// An object whose attributes are read. Empty means "pass through as is".
    Record,
    /// A sequence iterated by a `for` loop.
    Array {
        /// Elements are used as whole values, not through attributes.
        direct_access: bool,
    },
    /// Loop variable that is never used (`for _ in xs`).
    Dummy,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Module => "Module",
            ShapeKind::Record => "Record",
            ShapeKind::Array { .. } => "Array",
            ShapeKind::Dummy => "Dummy",
        }
    }

    /// Same variant, ignoring flags.
    pub fn same_variant(self, other: ShapeKind) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }

    pub fn is_array(self) -> bool {
        matches!(self, ShapeKind::Array { .. })
    }
}

/// Ordered child mapping of a node.
pub type Fields = IndexMap<String, Option<ShapeId>>;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ShapeNode {
    kind: ShapeKind,
    fields: Fields,
}

impl ShapeNode {
    fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            fields: IndexMap::new(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn is_direct_access(&self) -> bool {
        matches!(
            self.kind,
            ShapeKind::Array {
                direct_access: true
            }
        )
    }
}

#[derive(Clone, Debug)]
pub struct ShapeTree {
    nodes: Vec<ShapeNode>,
}

impl Default for ShapeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![ShapeNode::new(ShapeKind::Module)],
        }
    }

    pub fn root(&self) -> ShapeId {
        ShapeId::ROOT
    }

    /// Allocates a detached node.
    pub fn alloc(&mut self, kind: ShapeKind) -> ShapeId {
        let id = ShapeId(self.nodes.len() as u32);
        self.nodes.push(ShapeNode::new(kind));
        id
    }

    /// Panics on an id from another tree that is out of range.
    pub fn node(&self, id: ShapeId) -> &ShapeNode {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: ShapeId) -> ShapeKind {
        self.node(id).kind
    }

    pub fn fields(&self, id: ShapeId) -> &Fields {
        &self.node(id).fields
    }

    /// `None`: no such field. `Some(None)`: bare value under the module.
    pub fn field(&self, id: ShapeId, name: &str) -> Option<Option<ShapeId>> {
        self.node(id).fields.get(name).copied()
    }

    pub fn set_field(&mut self, id: ShapeId, name: impl Into<String>, child: Option<ShapeId>) {
        self.nodes[id.index()].fields.insert(name.into(), child);
    }

    /// Marks an array as read whole. No effect on other kinds.
    pub fn set_direct_access(&mut self, id: ShapeId) {
        if let ShapeKind::Array { direct_access } = &mut self.nodes[id.index()].kind {
            *direct_access = true;
        }
    }

    /// A record read whole: no attributes below it.
    pub fn is_leaf_record(&self, id: ShapeId) -> bool {
        let node = self.node(id);
        node.kind == ShapeKind::Record && node.fields.is_empty()
    }

    /// Turns a leaf record into a list read whole, keeping its id.
    ///
    /// A leaf record only says "the value is read"; a list read that way is
    /// a directly accessed array.
    pub(crate) fn promote_to_array(&mut self, id: ShapeId) {
        debug_assert!(self.is_leaf_record(id));
        self.nodes[id.index()].kind = ShapeKind::Array {
            direct_access: true,
        };
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields(self.root()).is_empty()
    }

    /// Longest chain of nested children below `id`; 0 for a node without children.
    pub fn depth(&self, id: ShapeId) -> usize {
        self.fields(id)
            .values()
            .map(|child| match child {
                Some(child) => self.depth(*child) + 1,
                None => 1,
            })
            .max()
            .unwrap_or(0)
    }

    pub fn first_key(&self, id: ShapeId) -> Option<&str> {
        self.fields(id).keys().next().map(String::as_str)
    }

    /// Dotted data paths of every leaf, in declaration order.
    ///
    /// A leaf is a bare value, an empty record, an array without attributes,
    /// or a directly read array (whose attributes are listed too).
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        self.collect_leaf_paths(self.root(), &mut prefix, &mut out);
        out
    }

    fn collect_leaf_paths<'a>(
        &'a self,
        id: ShapeId,
        prefix: &mut Vec<&'a str>,
        out: &mut Vec<String>,
    ) {
        for (name, child) in self.fields(id) {
            prefix.push(name);
            match child {
                None => out.push(prefix.join(".")),
                Some(child) => {
                    let node = self.node(*child);
                    match node.kind {
                        ShapeKind::Dummy => {}
                        _ if node.fields.is_empty() || node.is_direct_access() => {
                            out.push(prefix.join("."));
                            self.collect_leaf_paths(*child, prefix, out);
                        }
                        _ => self.collect_leaf_paths(*child, prefix, out),
                    }
                }
            }
            prefix.pop();
        }
    }

    /// Ids reachable from `id`, `id` included, in depth-first order.
    pub fn descendants(&self, id: ShapeId) -> Vec<ShapeId> {
        let mut seen = vec![false; self.nodes.len()];
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if std::mem::replace(&mut seen[current.index()], true) {
                continue;
            }
            out.push(current);
            stack.extend(self.fields(current).values().rev().flatten().copied());
        }
        out
    }

    pub fn printer(&self) -> ShapePrinter<'_> {
        ShapePrinter::new(self)
    }

    pub fn dump(&self) -> String {
        self.printer().dump()
    }

    /// Structural snapshot of the tree, independent of node ids.
    pub fn to_serialized(&self) -> SerializedShape {
        SerializedShape::from_tree(self, self.root())
    }

    /// Structural equality of the trees reachable from both roots.
    pub fn same_shape(&self, other: &ShapeTree) -> bool {
        self.to_serialized() == other.to_serialized()
    }
}
