//! Rendering data against an inferred shape.
//!
//! The renderer walks a [`ShapeTree`] alongside a payload and produces a
//! plain [`Value`] containing only what the template reads:
//!
//! - `Module`: every key is required (absent or `null` is [`RenderError::MissingKey`])
//! - `Record`: an empty record copies the data, otherwise each attribute is projected
//! - `Array`: direct access copies the data, no attributes omits the key,
//!   otherwise every element is projected in input order
//! - `Dummy`: omitted
//!
//! Only the top level is validated up front. Deeper lookups fail as they
//! are reached, with the data path in the error.

mod data;
mod path;
mod trace;

#[cfg(test)]
mod render_tests;

use indexmap::IndexMap;
use vellum_core::Value;

pub use data::RenderData;
pub use path::{DataPath, Segment};
pub use trace::{NoopTracer, PrintTracer, Tracer};

use crate::shape::{ShapeId, ShapeKind, ShapeTree};

/// Errors returned by a single render call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// A top-level variable is absent or `null`.
    #[error("the key '{key}' must be present in your data dictionary")]
    MissingKey { key: String },

    /// A declared attribute is absent on the data.
    #[error("`{path}` has no attribute `{attr}`")]
    AttributeLookup { path: String, attr: String },

    /// A list was expected.
    #[error("`{path}` is not a sequence (found {found})")]
    NotIterable { path: String, found: &'static str },
}

/// Renders a full payload with no tracing.
pub fn render<D: RenderData>(tree: &ShapeTree, data: &D) -> Result<Value, RenderError> {
    Renderer::new(tree).render(data)
}

/// How a node's children are looked up.
#[derive(Clone, Copy)]
enum Lookup {
    Item,
    Attr,
}

pub struct Renderer<'t, T: Tracer = NoopTracer> {
    tree: &'t ShapeTree,
    tracer: T,
    path: DataPath,
}

impl<'t> Renderer<'t> {
    pub fn new(tree: &'t ShapeTree) -> Self {
        Self {
            tree,
            tracer: NoopTracer,
            path: DataPath::new(),
        }
    }
}

impl<'t, T: Tracer> Renderer<'t, T> {
    pub fn with_tracer<U: Tracer>(self, tracer: U) -> Renderer<'t, U> {
        Renderer {
            tree: self.tree,
            tracer,
            path: self.path,
        }
    }

    pub fn tracer(&self) -> &T {
        &self.tracer
    }

    pub fn into_tracer(self) -> T {
        self.tracer
    }

    /// Renders `data` from the module root. The result is always an object.
    pub fn render<D: RenderData>(&mut self, data: &D) -> Result<Value, RenderError> {
        self.path.clear();
        let root = self.tree.root();
        let result = self.render_node(root, data);
        if let Err(err) = &result {
            self.tracer.trace_error(err);
        }
        Ok(result?.unwrap_or_else(|| Value::Object(IndexMap::new())))
    }

    fn render_node<D: RenderData>(
        &mut self,
        id: ShapeId,
        data: &D,
    ) -> Result<Option<Value>, RenderError> {
        let tree = self.tree;
        let node = tree.node(id);
        self.tracer.trace_enter(&self.path, node.kind());

        let result = match node.kind() {
            ShapeKind::Module => self.render_fields(id, data, Lookup::Item).map(Some),
            ShapeKind::Record if node.fields().is_empty() => Ok(Some(self.copy(data))),
            ShapeKind::Record => self.render_fields(id, data, Lookup::Attr).map(Some),
            ShapeKind::Array {
                direct_access: true,
            } => Ok(Some(self.copy(data))),
            ShapeKind::Array { .. } if node.fields().is_empty() => {
                self.tracer.trace_omit(&self.path);
                Ok(None)
            }
            ShapeKind::Array { .. } => self.render_elements(id, data).map(Some),
            ShapeKind::Dummy => {
                self.tracer.trace_omit(&self.path);
                Ok(None)
            }
        };

        self.tracer.trace_exit();
        result
    }

    fn render_elements<D: RenderData>(
        &mut self,
        id: ShapeId,
        data: &D,
    ) -> Result<Value, RenderError> {
        let Some(elements) = data.elements() else {
            return Err(RenderError::NotIterable {
                path: self.path.to_string(),
                found: data.type_name(),
            });
        };

        let mut out = Vec::new();
        for (index, element) in elements.enumerate() {
            self.path.push_index(index);
            self.tracer.trace_element(&self.path);
            let projected = self.render_fields(id, element, Lookup::Attr);
            self.tracer.trace_exit();
            self.path.pop();
            out.push(projected?);
        }
        Ok(Value::Array(out))
    }

    /// Builds an object from the children of `id`, skipping those that render to nothing.
    fn render_fields<D: RenderData>(
        &mut self,
        id: ShapeId,
        data: &D,
        lookup: Lookup,
    ) -> Result<Value, RenderError> {
        let tree = self.tree;
        let mut out = IndexMap::new();
        for (name, child) in tree.fields(id) {
            let value = self.lookup(data, name, lookup)?;
            self.path.push_key(name);
            let rendered = match child {
                None => Ok(Some(self.copy(value))),
                Some(child) => self.render_node(*child, value),
            };
            self.path.pop();
            if let Some(rendered) = rendered? {
                out.insert(name.clone(), rendered);
            }
        }
        Ok(Value::Object(out))
    }

    fn lookup<'d, D: RenderData>(
        &self,
        data: &'d D,
        name: &str,
        lookup: Lookup,
    ) -> Result<&'d D, RenderError> {
        match lookup {
            Lookup::Item => match data.get_item(name) {
                Some(value) if !value.is_null() => Ok(value),
                _ => Err(RenderError::MissingKey {
                    key: name.to_owned(),
                }),
            },
            Lookup::Attr => data
                .get_attr(name)
                .ok_or_else(|| RenderError::AttributeLookup {
                    path: self.path.to_string(),
                    attr: name.to_owned(),
                }),
        }
    }

    fn copy<D: RenderData>(&mut self, data: &D) -> Value {
        self.tracer.trace_copy(&self.path);
        data.to_value()
    }
}
