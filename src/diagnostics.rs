//! Unified, `miette`-based diagnostics for Arbor.
//!
//! Every failure the materializer, the tree parser or the driver can produce
//! is an [`ArborError`]. Materialization errors carry the offending tagged
//! array as compact JSON so a report can show exactly what was rejected;
//! parse errors carry the source text and a byte span instead.
//!
//! Construct errors through the helpers at the bottom of this module
//! (`unknown_construct`, `malformed_shape`, ...) rather than by hand.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use serde::Serialize;
use thiserror::Error;

use crate::syntax::TaggedTree;

// ============================================================================
// SOURCE CONTEXT
// ============================================================================

/// Shared, named source text attached to diagnostics.
pub type SourceArc = Arc<NamedSource<String>>;

/// A byte range into a source unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length used for labels; zero-width spans still get a one-column caret.
    fn label_len(&self) -> usize {
        if self.end > self.start {
            self.end - self.start
        } else {
            1
        }
    }
}

/// Minimal, composable error context for diagnostics.
#[derive(Debug, Default)]
pub struct ErrorContext {
    /// The source unit this error refers to (if any).
    pub source: Option<SourceArc>,
    /// The primary span inside `source` (if any).
    pub span: Option<Span>,
    /// An optional help message.
    pub help: Option<String>,
}

impl ErrorContext {
    /// Returns an empty error context (no source, span, or help).
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates a context with only a help message.
    pub fn with_help(help: impl Into<String>) -> Self {
        Self {
            help: Some(help.into()),
            ..Self::default()
        }
    }

    /// Creates a context with only a span.
    pub fn with_span(span: Span) -> Self {
        Self {
            span: Some(span),
            ..Self::default()
        }
    }

    /// Creates a context with both source and span.
    pub fn with_source_and_span(source: SourceArc, span: Span) -> Self {
        Self {
            source: Some(source),
            span: Some(span),
            help: None,
        }
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Type-safe error classification, mirroring the [`ArborError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// A tag with no registry entry.
    UnknownConstruct,
    /// A slot that is absent or has the wrong shape for its variant.
    MalformedShape,
    /// The upstream parser rejected the source text.
    Parse,
    /// The driver could not read its inputs.
    Io,
}

impl ErrorType {
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            ErrorType::UnknownConstruct => "unknown_construct",
            ErrorType::MalformedShape => "malformed_shape",
            ErrorType::Parse => "parse",
            ErrorType::Io => "io",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code_suffix())
    }
}

/// Unified error type for every Arbor failure mode.
#[derive(Debug, Error)]
pub enum ArborError {
    #[error("unknown construct '{tag}' in {raw}")]
    UnknownConstruct {
        tag: String,
        raw: String,
        ctx: ErrorContext,
    },
    #[error("malformed {construct}: {message} in {raw}")]
    MalformedShape {
        construct: String,
        message: String,
        raw: String,
        ctx: ErrorContext,
    },
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
    #[error("IO error: {message}")]
    Io {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
}

impl ArborError {
    fn get_ctx(&self) -> &ErrorContext {
        match self {
            ArborError::UnknownConstruct { ctx, .. } => ctx,
            ArborError::MalformedShape { ctx, .. } => ctx,
            ArborError::Parse { ctx, .. } => ctx,
            ArborError::Io { ctx, .. } => ctx,
        }
    }

    /// Returns the type-safe classification for this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            ArborError::UnknownConstruct { .. } => ErrorType::UnknownConstruct,
            ArborError::MalformedShape { .. } => ErrorType::MalformedShape,
            ArborError::Parse { .. } => ErrorType::Parse,
            ArborError::Io { .. } => ErrorType::Io,
        }
    }

    /// Attaches a named source to an error that has none yet.
    ///
    /// The driver uses this to tell the user which file a materialization
    /// error came from; spans are left untouched.
    pub fn with_source(mut self, source: &SourceArc) -> Self {
        let ctx = match &mut self {
            ArborError::UnknownConstruct { ctx, .. }
            | ArborError::MalformedShape { ctx, .. }
            | ArborError::Parse { ctx, .. }
            | ArborError::Io { ctx, .. } => ctx,
        };
        if ctx.source.is_none() {
            ctx.source = Some(Arc::clone(source));
        }
        self
    }

    fn primary_label(&self) -> String {
        match self {
            ArborError::UnknownConstruct { tag, .. } => format!("unknown tag '{tag}'"),
            ArborError::MalformedShape { message, .. } => message.clone(),
            ArborError::Parse { message, .. } => message.clone(),
            ArborError::Io { message, .. } => message.clone(),
        }
    }
}

impl Diagnostic for ArborError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let phase = match self.error_type() {
            ErrorType::UnknownConstruct | ErrorType::MalformedShape => "materialize",
            ErrorType::Parse => "syntax",
            ErrorType::Io => "driver",
        };
        Some(Box::new(format!(
            "arbor::{}::{}",
            phase,
            self.error_type().code_suffix()
        )))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.get_ctx()
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        let ctx = self.get_ctx();
        // Without a span there is nothing to point at; keep the report compact.
        ctx.span?;
        ctx.source.as_ref().map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.get_ctx().span?;
        let label = LabeledSpan::new(Some(self.primary_label()), span.start, span.label_len());
        Some(Box::new(std::iter::once(label)))
    }
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

/// Converts a source string into an `Arc<NamedSource<String>>`.
pub fn to_error_source(name: impl AsRef<str>, source: impl AsRef<str>) -> SourceArc {
    Arc::new(NamedSource::new(name.as_ref(), source.as_ref().to_string()))
}

/// Compact JSON rendering of a tagged array for error payloads.
pub fn render_raw(tree: &TaggedTree) -> String {
    serde_json::to_string(tree).unwrap_or_else(|_| format!("{tree:?}"))
}

/// A tag with no registry entry.
pub fn unknown_construct(tag: &str, tree: &TaggedTree) -> ArborError {
    ArborError::UnknownConstruct {
        tag: tag.to_string(),
        raw: render_raw(tree),
        ctx: ErrorContext::with_help(
            "the upstream parser produced a construct this materializer does not register",
        ),
    }
}

/// A slot that is absent or mis-typed for its variant.
pub fn malformed_shape(
    construct: &str,
    message: impl Into<String>,
    tree: &TaggedTree,
) -> ArborError {
    ArborError::MalformedShape {
        construct: construct.to_string(),
        message: message.into(),
        raw: render_raw(tree),
        ctx: ErrorContext::none(),
    }
}

/// An I/O failure in the driver, keeping the underlying error as the cause.
pub fn io_error(message: impl Into<String>, cause: std::io::Error) -> ArborError {
    ArborError::Io {
        message: message.into(),
        ctx: ErrorContext::none(),
        source: Some(Box::new(cause)),
    }
}

#[cfg(test)]
mod diagnostics_tests {
    use miette::Report;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_unknown_construct_report() {
        let err = unknown_construct("with", &json!(["with", ["name", "o"], ["block"]]));
        assert_eq!(err.error_type(), ErrorType::UnknownConstruct);
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("arbor::materialize::unknown_construct"));
        assert!(output.contains("with"));
    }

    #[test]
    fn test_malformed_shape_display_includes_raw() {
        let tree = json!(["call", ["name", "f"], 3]);
        let err = malformed_shape("call", "slot 2 must be an array", &tree);
        let text = err.to_string();
        assert!(text.contains("malformed call"));
        assert!(text.contains(r#"["call",["name","f"],3]"#));
    }

    #[test]
    fn test_parse_error_labels_span() {
        let src = to_error_source("unit.json", "[\"toplevel\", ");
        let err = ArborError::Parse {
            message: "EOF while parsing a list".to_string(),
            ctx: ErrorContext::with_source_and_span(src, Span::new(12, 12)),
            source: None,
        };
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("unit.json"));
        assert!(output.contains("EOF while parsing a list"));
    }

    #[test]
    fn test_with_source_keeps_existing() {
        let first = to_error_source("a.json", "[]");
        let second = to_error_source("b.json", "[]");
        let err = ArborError::Parse {
            message: "x".into(),
            ctx: ErrorContext::with_source_and_span(Arc::clone(&first), Span::default()),
            source: None,
        }
        .with_source(&second);
        let name = err.get_ctx().source.as_ref().map(|s| s.name().to_string());
        assert_eq!(name.as_deref(), Some("a.json"));
    }
}
