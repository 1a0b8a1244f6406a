//! Id-free, serializable form of a shape tree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{ShapeId, ShapeKind, ShapeTree};

/// Nested shape value, suitable for JSON output and structural comparison.
///
/// A bare value under the module serializes as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SerializedShape {
    Module {
        fields: IndexMap<String, Option<SerializedShape>>,
    },
    Record {
        fields: IndexMap<String, Option<SerializedShape>>,
    },
    Array {
        direct_access: bool,
        fields: IndexMap<String, Option<SerializedShape>>,
    },
    Dummy,
}

impl SerializedShape {
    pub fn from_tree(tree: &ShapeTree, id: ShapeId) -> Self {
        let fields = || {
            tree.fields(id)
                .iter()
                .map(|(name, child)| {
                    let child = child.map(|child| Self::from_tree(tree, child));
                    (name.clone(), child)
                })
                .collect()
        };
        match tree.kind(id) {
            ShapeKind::Module => Self::Module { fields: fields() },
            ShapeKind::Record => Self::Record { fields: fields() },
            ShapeKind::Array { direct_access } => Self::Array {
                direct_access,
                fields: fields(),
            },
            ShapeKind::Dummy => Self::Dummy,
        }
    }

    /// Rebuilds an arena from this shape. The outermost node must be a `Module`.
    pub fn to_tree(&self) -> Option<ShapeTree> {
        let Self::Module { fields } = self else {
            return None;
        };
        let mut tree = ShapeTree::new();
        let root = tree.root();
        Self::attach(&mut tree, root, fields);
        Some(tree)
    }

    fn attach(
        tree: &mut ShapeTree,
        parent: ShapeId,
        fields: &IndexMap<String, Option<SerializedShape>>,
    ) {
        for (name, child) in fields {
            let Some(child) = child else {
                tree.set_field(parent, name.clone(), None);
                continue;
            };
            let (kind, grandchildren) = match child {
                Self::Module { fields } | Self::Record { fields } => (ShapeKind::Record, Some(fields)),
                Self::Array {
                    direct_access,
                    fields,
                } => (
                    ShapeKind::Array {
                        direct_access: *direct_access,
                    },
                    Some(fields),
                ),
                Self::Dummy => (ShapeKind::Dummy, None),
            };
            let id = tree.alloc(kind);
            tree.set_field(parent, name.clone(), Some(id));
            if let Some(grandchildren) = grandchildren {
                Self::attach(tree, id, grandchildren);
            }
        }
    }
}
