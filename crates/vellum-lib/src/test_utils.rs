//! Test utilities and snapshot macros.

use crate::{Error, Template, TemplateBuilder};

impl Template {
    #[track_caller]
    pub fn expect_valid(src: &str) -> Template {
        match Template::try_from(src) {
            Ok(template) => template,
            Err(err) => panic!("Expected valid template, got {err}:\n{}", dump_error(&err)),
        }
    }

    #[track_caller]
    pub fn expect_valid_shape(src: &str) -> String {
        Template::expect_valid(src).shape().dump()
    }

    /// Rendered diagnostics of a template that must fail to build.
    #[track_caller]
    pub fn expect_invalid(src: &str) -> String {
        match TemplateBuilder::one_liner(src).build() {
            Ok(template) => panic!(
                "Expected invalid template, got valid:\n{}",
                template.shape().dump()
            ),
            Err(err) => dump_error(&err),
        }
    }
}

/// One `Display` line per diagnostic, independent of the snippet renderer.
fn dump_error(err: &Error) -> String {
    match err.diagnostics() {
        Some(diagnostics) => diagnostics
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        None => err.to_string(),
    }
}

/// Snapshot test for the inferred shape.
#[macro_export]
macro_rules! shot_shape {
    ($src:literal, @$snapshot:literal) => {{
        let src = indoc::indoc!($src);
        let output = $crate::Template::expect_valid_shape(src);
        insta::assert_snapshot!(output, @$snapshot);
    }};
}

/// Snapshot test for build errors, one diagnostic per line.
#[macro_export]
macro_rules! shot_error {
    ($src:literal, @$snapshot:literal) => {{
        let src = indoc::indoc!($src);
        let output = $crate::Template::expect_invalid(src);
        insta::assert_snapshot!(output, @$snapshot);
    }};
}
