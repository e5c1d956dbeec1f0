//! Error types for loading diagram documents

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("syntax error: {message}")]
    Syntax { message: String, span: Option<Span> },

    #[error("duplicate {kind} id '{id}'")]
    DuplicateId {
        kind: &'static str,
        id: String,
        span: Span,
    },

    #[error("undefined shape '{name}'")]
    UnknownShape { name: String, span: Span },

    #[error("shape '{shape}' has no anchor '{anchor}'")]
    UnknownAnchor {
        shape: String,
        anchor: String,
        span: Span,
    },

    #[error("anchor name '{name}' is reserved for boundary anchors")]
    ReservedAnchorName { name: String, span: Span },
}

impl DocumentError {
    pub fn duplicate(kind: &'static str, id: impl Into<String>, span: Span) -> Self {
        Self::DuplicateId {
            kind,
            id: id.into(),
            span,
        }
    }

    pub fn unknown_shape(name: impl Into<String>, span: Span) -> Self {
        Self::UnknownShape {
            name: name.into(),
            span,
        }
    }

    pub fn unknown_anchor(shape: impl Into<String>, anchor: impl Into<String>, span: Span) -> Self {
        Self::UnknownAnchor {
            shape: shape.into(),
            anchor: anchor.into(),
            span,
        }
    }

    /// Get the source span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::Syntax { span, .. } => span.as_ref(),
            Self::DuplicateId { span, .. }
            | Self::UnknownShape { span, .. }
            | Self::UnknownAnchor { span, .. }
            | Self::ReservedAnchorName { span, .. } => Some(span),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let span = self.span().cloned().unwrap_or(0..0);
        let message = self.to_string();
        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(&message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);
        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => message,
        }
    }
}

impl From<toml::de::Error> for DocumentError {
    fn from(err: toml::de::Error) -> Self {
        DocumentError::Syntax {
            message: err.message().to_string(),
            span: err.span(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_shape_display() {
        let err = DocumentError::unknown_shape("gateway", 10..17);
        assert_eq!(err.to_string(), "undefined shape 'gateway'");
        assert_eq!(err.span(), Some(&(10..17)));
    }

    #[test]
    fn test_format_includes_source_line() {
        let source = "shape = \"gateway\"\n";
        let err = DocumentError::unknown_shape("gateway", 8..17);
        let report = err.format(source, "diagram.toml");
        assert!(report.contains("undefined shape 'gateway'"));
        assert!(report.contains("diagram.toml"));
    }

    #[test]
    fn test_syntax_error_from_toml() {
        let err: DocumentError = toml::from_str::<toml::Table>("this is = = not toml")
            .unwrap_err()
            .into();
        assert!(matches!(err, DocumentError::Syntax { .. }));
        assert!(err.span().is_some());
    }
}
