//! Overlaying one shape onto another.

use super::{ShapeId, ShapeKind, ShapeNode, ShapeTree};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// The same path is used as two different kinds of value.
    #[error("`{path}` is used both as {existing} and as {incoming}")]
    ShapeConflict {
        path: String,
        existing: &'static str,
        incoming: &'static str,
    },

    /// The source already contains the destination, merging would nest it into itself.
    #[error("cannot merge a shape into one of its own descendants")]
    SelfNesting,
}

impl MergeError {
    pub(crate) fn conflict(path: &[String], existing: ShapeKind, incoming: ShapeKind) -> Self {
        MergeError::ShapeConflict {
            path: display_path(path),
            existing: describe(existing),
            incoming: describe(incoming),
        }
    }
}

impl ShapeTree {
    /// Recursively overlays `src` onto `dst`, in place.
    ///
    /// Both nodes must be the same variant, except that a leaf record (a
    /// value read whole) meets an array as a directly accessed array.
    /// Existing keys merge recursively and new keys are linked (not copied).
    /// A bare value (`None`) yields to the other side; a list that is also
    /// read whole becomes directly accessed. `direct_access` flags are
    /// OR-ed. Merging a node with itself leaves it unchanged.
    pub fn update(&mut self, dst: ShapeId, src: ShapeId) -> Result<(), MergeError> {
        if dst == src {
            return Ok(());
        }
        if self.descendants(src).contains(&dst) {
            return Err(MergeError::SelfNesting);
        }
        let mut path = Vec::new();
        self.update_at(dst, src, &mut path)
    }

    fn update_at(
        &mut self,
        dst: ShapeId,
        src: ShapeId,
        path: &mut Vec<String>,
    ) -> Result<(), MergeError> {
        if dst == src {
            return Ok(());
        }

        let dst_kind = self.kind(dst);
        let src_kind = self.kind(src);
        match (dst_kind, src_kind) {
            (ShapeKind::Record, ShapeKind::Array { .. }) if self.is_leaf_record(dst) => {
                self.promote_to_array(dst);
            }
            (ShapeKind::Array { .. }, ShapeKind::Record) if self.is_leaf_record(src) => {
                self.set_direct_access(dst);
                return Ok(());
            }
            _ if !dst_kind.same_variant(src_kind) => {
                return Err(MergeError::conflict(path, dst_kind, src_kind));
            }
            _ => {}
        }

        if let ShapeKind::Array {
            direct_access: true,
        } = src_kind
        {
            self.set_direct_access(dst);
        }

        let incoming = self.fields(src).clone();
        for (name, src_child) in incoming {
            let existing = self.field(dst, &name);
            match (existing, src_child) {
                (None, child) => self.set_field(dst, name, child),
                (Some(None), Some(src_child)) => {
                    self.set_field(dst, name, Some(src_child));
                    self.set_direct_access(src_child);
                }
                (Some(Some(dst_child)), None) => self.set_direct_access(dst_child),
                (Some(None), None) => {}
                (Some(Some(dst_child)), Some(src_child)) => {
                    path.push(name);
                    self.update_at(dst_child, src_child, path)?;
                    path.pop();
                }
            }
        }
        Ok(())
    }

    /// Imports every node of `other` and overlays its root onto this root.
    pub fn merge_tree(&mut self, other: &ShapeTree) -> Result<(), MergeError> {
        let offset = self.nodes.len() as u32;
        let imported_root = ShapeId(offset + other.root().0);
        for node in &other.nodes {
            let fields = node
                .fields
                .iter()
                .map(|(name, child)| (name.clone(), child.map(|id| ShapeId(id.0 + offset))))
                .collect();
            self.nodes.push(ShapeNode {
                kind: node.kind,
                fields,
            });
        }
        let root = self.root();
        self.update(root, imported_root)
    }
}

fn describe(kind: ShapeKind) -> &'static str {
    match kind {
        ShapeKind::Module => "the template root",
        ShapeKind::Record => "an object",
        ShapeKind::Array { .. } => "a list",
        ShapeKind::Dummy => "an unused loop variable",
    }
}

fn display_path(path: &[String]) -> String {
    if path.is_empty() {
        return "<root>".to_string();
    }
    path.join(".")
}
