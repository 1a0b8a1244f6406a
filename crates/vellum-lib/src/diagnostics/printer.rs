//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::{DiagnosticMessage, Severity};
use crate::template::SourceMap;

pub struct DiagnosticsPrinter<'s> {
    diagnostics: Vec<DiagnosticMessage>,
    sources: &'s SourceMap,
    colored: bool,
}

impl<'s> DiagnosticsPrinter<'s> {
    pub fn new(diagnostics: Vec<DiagnosticMessage>, sources: &'s SourceMap) -> Self {
        Self {
            diagnostics,
            sources,
            colored: false,
        }
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            let Some(source) = self.sources.try_get(diag.source) else {
                // Unknown source: fall back to the plain form.
                if i > 0 {
                    w.write_char('\n')?;
                }
                write!(w, "{}", diag)?;
                continue;
            };
            let content = source.content;
            let range = adjust_range(diag.range, content.len());

            let mut snippet = Snippet::source(content)
                .line_start(1)
                .path(source.kind.display_name())
                .annotation(
                    AnnotationKind::Primary
                        .span(range)
                        .label(&diag.message),
                );

            for related in &diag.related {
                snippet = snippet.annotation(
                    AnnotationKind::Context
                        .span(adjust_range(related.range, content.len()))
                        .label(&related.message),
                );
            }

            let level = severity_to_level(diag.severity());
            let mut title_group = level.primary_title(&diag.message).element(snippet);
            for hint in &diag.hints {
                title_group = title_group.element(Level::HELP.message(hint.as_str()));
            }

            let report: Vec<Group> = vec![title_group];

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

fn adjust_range(range: TextRange, limit: usize) -> std::ops::Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}
