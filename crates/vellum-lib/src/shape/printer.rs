//! Indented text dump of a shape tree.

use std::fmt::Write;

use vellum_core::Colors;

use super::{ShapeId, ShapeKind, ShapeTree};

pub struct ShapePrinter<'t> {
    tree: &'t ShapeTree,
    colors: Colors,
    depths: bool,
}

impl<'t> ShapePrinter<'t> {
    pub fn new(tree: &'t ShapeTree) -> Self {
        Self {
            tree,
            colors: Colors::OFF,
            depths: false,
        }
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colors = Colors::new(value);
        self
    }

    /// Annotate container nodes with their [`ShapeTree::depth`].
    pub fn with_depths(mut self, value: bool) -> Self {
        self.depths = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let root = self.tree.root();
        let c = self.colors;
        write!(w, "{}Module{}", c.green, c.reset)?;
        self.format_depth(root, w)?;
        writeln!(w)?;
        self.format_fields(root, 1, w)
    }

    fn format_fields(&self, id: ShapeId, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let c = self.colors;
        let prefix = "  ".repeat(indent);
        for (name, child) in self.tree.fields(id) {
            write!(w, "{prefix}{}{name}{}: ", c.blue, c.reset)?;
            let Some(child) = child else {
                writeln!(w, "{}Scalar{}", c.green, c.reset)?;
                continue;
            };
            let kind = self.tree.kind(*child);
            write!(w, "{}{}{}", c.green, kind.name(), c.reset)?;
            if let ShapeKind::Array {
                direct_access: true,
            } = kind
            {
                write!(w, " {}(direct){}", c.dim, c.reset)?;
            }
            self.format_depth(*child, w)?;
            writeln!(w)?;
            self.format_fields(*child, indent + 1, w)?;
        }
        Ok(())
    }

    fn format_depth(&self, id: ShapeId, w: &mut impl Write) -> std::fmt::Result {
        if !self.depths || self.tree.fields(id).is_empty() {
            return Ok(());
        }
        let c = self.colors;
        write!(w, " {}depth={}{}", c.dim, self.tree.depth(id), c.reset)
    }
}
