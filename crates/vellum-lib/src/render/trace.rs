//! Tracing hooks for the renderer.
//!
//! `NoopTracer` is the default: every method is an `#[inline(always)]` empty
//! function, so an untraced render carries no tracing cost. `PrintTracer`
//! collects one indented line per step for `vellum render --trace`.

use vellum_core::Colors;

use super::{DataPath, RenderError};
use crate::shape::ShapeKind;

/// Renderer instrumentation.
///
/// Calls are properly nested: every `trace_enter` and `trace_element` is
/// closed by exactly one `trace_exit`.
pub trait Tracer {
    /// Called before a shape node is rendered against the data at `path`.
    fn trace_enter(&mut self, path: &DataPath, kind: ShapeKind);

    /// Called before an element of a list is projected.
    fn trace_element(&mut self, path: &DataPath);

    /// Called when the data at `path` is copied verbatim.
    fn trace_copy(&mut self, path: &DataPath);

    /// Called when the node at `path` produces no value.
    fn trace_omit(&mut self, path: &DataPath);

    /// Called after the innermost entered node or element is done.
    fn trace_exit(&mut self);

    /// Called once when rendering fails.
    fn trace_error(&mut self, error: &RenderError);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_enter(&mut self, _path: &DataPath, _kind: ShapeKind) {}

    #[inline(always)]
    fn trace_element(&mut self, _path: &DataPath) {}

    #[inline(always)]
    fn trace_copy(&mut self, _path: &DataPath) {}

    #[inline(always)]
    fn trace_omit(&mut self, _path: &DataPath) {}

    #[inline(always)]
    fn trace_exit(&mut self) {}

    #[inline(always)]
    fn trace_error(&mut self, _error: &RenderError) {}
}

/// Tracer that collects a readable render log.
pub struct PrintTracer {
    lines: Vec<String>,
    depth: usize,
    colors: Colors,
}

impl PrintTracer {
    pub fn new(colors: Colors) -> Self {
        Self {
            lines: Vec::new(),
            depth: 0,
            colors,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn dump(&self) -> String {
        self.lines.join("\n")
    }

    /// Print all trace lines to stderr.
    pub fn print(&self) {
        for line in &self.lines {
            eprintln!("{}", line);
        }
    }

    fn push(&mut self, label: &str, path: &DataPath) {
        let c = self.colors;
        let indent = "  ".repeat(self.depth);
        self.lines.push(format!(
            "{indent}{}{label}{} {}{path}{}",
            c.green, c.reset, c.blue, c.reset
        ));
    }
}

impl Tracer for PrintTracer {
    fn trace_enter(&mut self, path: &DataPath, kind: ShapeKind) {
        self.push(kind.name(), path);
        self.depth += 1;
    }

    fn trace_element(&mut self, path: &DataPath) {
        self.push("element", path);
        self.depth += 1;
    }

    fn trace_copy(&mut self, path: &DataPath) {
        self.push("copy", path);
    }

    fn trace_omit(&mut self, path: &DataPath) {
        self.push("omit", path);
    }

    fn trace_exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn trace_error(&mut self, error: &RenderError) {
        let c = self.colors;
        let indent = "  ".repeat(self.depth);
        let line = format!("{indent}{}error:{} {error}", c.dim, c.reset);
        self.lines.push(line);
    }
}
