use rowan::TextRange;

use crate::template::SourceId;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// When two diagnostics overlap, the higher-priority one suppresses the
/// lower-priority one. Unclosed delimiters come first because everything
/// after them is suspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Cascading structure errors
    UnclosedParen,
    InconsistentIndentation,

    // User omitted something required - root cause errors
    ExpectedExpression,
    ExpectedTarget,
    ExpectedIn,
    ExpectedColon,
    ExpectedBody,
    ExpectedAttributeName,

    // User wrote something that doesn't belong
    UnexpectedIndent,
    ExpectedLineEnd,
    UnexpectedToken,

    // Valid syntax, outside the supported template subset
    UnsupportedTarget,
    UnsupportedExpression,

    // Shape inference
    UnboundName,
    ShapeConflict,

    // Warnings
    ShadowedLoopVariable,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::ShadowedLoopVariable => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Uses enum discriminant ordering: lower position = higher priority.
    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    pub fn is_structural_error(&self) -> bool {
        matches!(self, Self::UnclosedParen | Self::InconsistentIndentation)
    }

    pub fn is_root_cause_error(&self) -> bool {
        matches!(
            self,
            Self::ExpectedExpression
                | Self::ExpectedTarget
                | Self::ExpectedIn
                | Self::ExpectedColon
                | Self::ExpectedBody
                | Self::ExpectedAttributeName
        )
    }

    /// Errors raised while building the shape rather than while parsing.
    pub fn is_inference_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedTarget
                | Self::UnsupportedExpression
                | Self::UnboundName
                | Self::ShapeConflict
        )
    }

    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedTarget => Some("bind a single name, e.g. `for item in items:`"),
            Self::ExpectedBody => Some("indent the loop body on the following lines"),
            Self::UnboundName => Some("declare the name or bind it with a `for` loop"),
            _ => None,
        }
    }

    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedParen => "missing closing `)`",
            Self::InconsistentIndentation => "unindent does not match any outer indentation level",

            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedTarget => "expected a loop variable",
            Self::ExpectedIn => "expected `in`",
            Self::ExpectedColon => "expected `:`",
            Self::ExpectedBody => "expected an indented loop body",
            Self::ExpectedAttributeName => "expected attribute name after `.`",

            Self::UnexpectedIndent => "unexpected indent",
            Self::ExpectedLineEnd => "expected end of line",
            Self::UnexpectedToken => "unexpected token",

            Self::UnsupportedTarget => "unsupported loop target",
            Self::UnsupportedExpression => "unsupported expression",

            Self::UnboundName => "name is not bound",
            Self::ShapeConflict => "conflicting uses of the same variable",

            Self::ShadowedLoopVariable => "loop variable shadows an outer loop variable",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnboundName => "`{}` is not bound".to_string(),
            Self::ShadowedLoopVariable => "`{}` shadows an outer loop variable".to_string(),
            Self::UnclosedParen => format!("{}; {{}}", self.fallback_message()),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// - `None` → `fallback_message()`
    /// - `Some(detail)` → `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Fragment the ranges point into.
    pub(crate) source: SourceId,
    pub(crate) range: TextRange,
    /// Errors inside another error's suppression range may be hidden.
    /// Defaults to `range`.
    pub(crate) suppression_range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(
        source: SourceId,
        kind: DiagnosticKind,
        range: TextRange,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            source,
            range,
            suppression_range: range,
            message: message.into(),
            related: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub(crate) fn with_default_message(
        source: SourceId,
        kind: DiagnosticKind,
        range: TextRange,
    ) -> Self {
        Self::new(source, kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
