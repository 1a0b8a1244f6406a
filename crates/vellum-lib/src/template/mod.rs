//! Template building: parse every fragment, infer its shape, merge the shapes.
//!
//! Each source in the [`SourceMap`] is parsed and inferred on its own, then
//! overlaid onto the template's accumulated [`ShapeTree`]. Sources that fail
//! to parse are not inferred. Any error makes the build fail; warnings are
//! kept on the built [`Template`].

mod source_map;

#[cfg(test)]
mod template_tests;

use indexmap::IndexSet;
use rowan::{TextRange, TextSize};
use vellum_core::Value;

pub use source_map::{Source, SourceId, SourceKind, SourceMap};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::infer::Inferrer;
use crate::parser::lexer::lex;
use crate::parser::{ParseResult, Parser, Root};
use crate::render::{RenderData, RenderError, Renderer};
use crate::shape::ShapeTree;
use crate::{Error, Result};

const DEFAULT_EXEC_FUEL: u32 = 1_000_000;
const DEFAULT_RECURSION_FUEL: u32 = 512;

pub struct TemplateBuilder {
    sources: SourceMap,
    declared: Option<IndexSet<String>>,
    exec_fuel: Option<u32>,
    recursion_fuel: Option<u32>,
}

impl TemplateBuilder {
    pub fn new(sources: SourceMap) -> Self {
        Self {
            sources,
            declared: None,
            exec_fuel: Some(DEFAULT_EXEC_FUEL),
            recursion_fuel: Some(DEFAULT_RECURSION_FUEL),
        }
    }

    pub fn one_liner(fragment: &str) -> Self {
        Self::new(SourceMap::one_liner(fragment))
    }

    /// Strict mode: top-level names other than these are `UnboundName` errors.
    ///
    /// Calling it repeatedly adds to the declared set.
    pub fn declare<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared
            .get_or_insert_with(IndexSet::new)
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Set execution fuel limit, shared by all fragments. None = infinite.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    /// Set nesting limit per fragment. None = infinite.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }

    /// Returns `Err` on fuel exhaustion or when any fragment has errors.
    pub fn build(self) -> Result<Template> {
        let mut shape = ShapeTree::new();
        let mut instructions = Vec::new();
        let mut parse_diagnostics = Diagnostics::new();
        let mut analyze_diagnostics = Diagnostics::new();
        let mut exec_fuel = self.exec_fuel;

        for source in self.sources.iter() {
            let parser = Parser::new(source.content, source.id, lex(source.content))
                .with_exec_fuel(exec_fuel)
                .with_recursion_fuel(self.recursion_fuel);
            let ParseResult {
                root,
                diagnostics,
                exec_fuel_consumed,
            } = parser.parse()?;
            exec_fuel = exec_fuel.map(|fuel| fuel.saturating_sub(exec_fuel_consumed));

            let parsed_ok = !diagnostics.has_errors();
            parse_diagnostics.extend(diagnostics);
            if parsed_ok {
                let diagnostics =
                    self.infer_fragment(&mut shape, &root, source.id, source.content);
                analyze_diagnostics.extend(diagnostics);
            }
            instructions.extend(root.for_stmts().filter_map(|stmt| stmt.header()));
        }

        if parse_diagnostics.has_errors() {
            parse_diagnostics.extend(analyze_diagnostics);
            return Err(Error::TemplateParseError(parse_diagnostics));
        }
        if analyze_diagnostics.has_errors() {
            return Err(Error::TemplateAnalyzeError(analyze_diagnostics));
        }

        parse_diagnostics.extend(analyze_diagnostics);
        Ok(Template {
            sources: self.sources,
            instructions,
            shape,
            diagnostics: parse_diagnostics,
        })
    }

    /// Infers one fragment on its own and overlays it onto `shape`.
    fn infer_fragment(
        &self,
        shape: &mut ShapeTree,
        root: &Root,
        source: SourceId,
        content: &str,
    ) -> Diagnostics {
        let mut fragment = ShapeTree::new();
        let mut inferrer = Inferrer::new(&mut fragment, source);
        if let Some(declared) = &self.declared {
            inferrer = inferrer.with_declared(declared);
        }
        let (_, mut diagnostics) = inferrer.infer(root);
        if diagnostics.has_errors() {
            return diagnostics;
        }

        if let Err(err) = shape.merge_tree(&fragment) {
            let range = TextRange::up_to(TextSize::of(content.trim_end()));
            diagnostics
                .report(source, DiagnosticKind::ShapeConflict, range)
                .message(err.to_string())
                .emit();
        }
        diagnostics
    }
}

/// A validated template: its fragments and the data shape they read.
///
/// Holds no syntax trees, so one template can render from many threads.
#[derive(Debug, Clone)]
pub struct Template {
    sources: SourceMap,
    instructions: Vec<String>,
    shape: ShapeTree,
    diagnostics: Diagnostics,
}

impl Template {
    pub fn builder(sources: SourceMap) -> TemplateBuilder {
        TemplateBuilder::new(sources)
    }

    pub fn shape(&self) -> &ShapeTree {
        &self.shape
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.sources
    }

    /// Warnings collected while building. Never contains errors.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Dotted data paths the template reads, e.g. `items.val`.
    pub fn user_variables(&self) -> Vec<String> {
        self.shape.leaf_paths()
    }

    /// Loop headers of every fragment in order, e.g. `for line in items`.
    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }

    pub fn renderer(&self) -> Renderer<'_> {
        Renderer::new(&self.shape)
    }

    /// Keeps only the parts of `data` the template reads.
    pub fn render<D: RenderData>(&self, data: &D) -> std::result::Result<Value, RenderError> {
        self.renderer().render(data)
    }
}

impl TryFrom<&str> for Template {
    type Error = Error;

    fn try_from(fragment: &str) -> Result<Self> {
        TemplateBuilder::one_liner(fragment).build()
    }
}
