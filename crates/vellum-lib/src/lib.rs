//! Vellum: shape inference and rendering for template expression fragments.
//!
//! A template is a set of small Python-like fragments (placeholders and
//! `for` loops). Vellum infers the shape of the data they read, then renders
//! any payload down to exactly that shape.
//!
//! # Example
//!
//! ```
//! use vellum_lib::Template;
//!
//! let source = "
//!     for line in invoice.lines:
//!         line.amount
//!     invoice.total
//! ";
//!
//! let template = Template::try_from(source).expect("valid template");
//! let data = serde_json::json!({
//!     "invoice": { "lines": [{ "amount": 3, "sku": "x" }], "total": 3, "notes": "" },
//! });
//! let out = template.render(&data).expect("all keys present");
//! assert_eq!(
//!     serde_json::Value::from(out),
//!     serde_json::json!({ "invoice": { "lines": [{ "amount": 3 }], "total": 3 } }),
//! );
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod infer;
pub mod parser;
pub mod render;
pub mod shape;
pub mod template;

#[cfg(test)]
pub mod test_utils;

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use render::{NoopTracer, PrintTracer, RenderData, RenderError, Renderer, Tracer};
pub use shape::{MergeError, SerializedShape, ShapeId, ShapeKind, ShapeTree};
pub use template::{SourceId, SourceKind, SourceMap, Template, TemplateBuilder};
pub use vellum_core::{Colors, Value};

/// Errors that can occur while building a template.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("template parsing failed with {} errors", .0.error_count())]
    TemplateParseError(Diagnostics),

    #[error("template analysis failed with {} errors", .0.error_count())]
    TemplateAnalyzeError(Diagnostics),
}

impl Error {
    /// Diagnostics carried by a parse or analysis failure.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Error::TemplateParseError(d) | Error::TemplateAnalyzeError(d) => Some(d),
            Error::ExecFuelExhausted | Error::RecursionLimitExceeded => None,
        }
    }
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, Error>;
