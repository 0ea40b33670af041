//! Semantic errors found while building and validating a definition graph

use thiserror::Error;

use crate::parser::ast::Span;

/// Errors that make a definition graph unusable
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SemanticError {
    /// Child reference to a definition that does not exist
    #[error("undefined definition '{name}' referenced from '{definition}'")]
    UndefinedReference {
        definition: String,
        name: String,
        span: Span,
        suggestions: Vec<String>,
    },

    /// Parameter reference or argument naming an undeclared parameter
    #[error("undefined parameter '{name}' in '{definition}'")]
    UndefinedParameter {
        definition: String,
        name: String,
        span: Span,
        suggestions: Vec<String>,
    },

    /// Static composition that would never finish constructing
    #[error("cyclic composition: {}", cycle.join(" -> "))]
    CyclicComposition { cycle: Vec<String>, span: Span },

    #[error("heritage violation in '{definition}' for '{parameter}': {reason}")]
    HeritageViolation {
        definition: String,
        parameter: String,
        reason: String,
        span: Span,
    },

    #[error("duplicate parameter '{name}' in '{definition}'")]
    DuplicateParameter {
        definition: String,
        name: String,
        span: Span,
    },

    #[error("duplicate insertion point '{name}' in '{definition}'")]
    DuplicateInsertionPoint {
        definition: String,
        name: String,
        span: Span,
    },

    #[error("duplicate definition '{name}'")]
    DuplicateDefinition { name: String, span: Span, first: Span },

    /// Two definitions whose names cannot be told apart
    #[error("identifiers '{first}' and '{second}' cannot be made distinct")]
    UnresolvableCollision { first: String, second: String },

    #[error("'{definition}' expands '{target}' with {found} argument(s), expected {expected}")]
    ArgumentCount {
        definition: String,
        target: String,
        expected: usize,
        found: usize,
        span: Span,
    },

    #[error("text definition '{definition}' may only contain literals and parameter references")]
    TextBodyViolation { definition: String, span: Span },

    #[error("'{target}' is created by more than one slot position of '{definition}'")]
    DuplicateSlotTarget {
        definition: String,
        target: String,
        span: Span,
    },

    #[error("unknown slot option '{name}' (valid options: none, separator, before_first, after_last)")]
    UnknownOption { name: String, span: Span },

    #[error("slot option '{name}' given more than once")]
    DuplicateOption { name: String, span: Span },

    /// Indentation prefix that would break line structure, or an unbalanced region
    #[error("invalid indentation in '{definition}': {reason}")]
    InvalidIndent {
        definition: String,
        reason: String,
        span: Span,
    },
}

impl SemanticError {
    /// Create an undefined reference error with suggestions
    pub fn undefined_reference(
        definition: impl Into<String>,
        name: impl Into<String>,
        span: Span,
        suggestions: Vec<String>,
    ) -> Self {
        Self::UndefinedReference {
            definition: definition.into(),
            name: name.into(),
            span,
            suggestions,
        }
    }

    /// Create an undefined parameter error with suggestions
    pub fn undefined_parameter(
        definition: impl Into<String>,
        name: impl Into<String>,
        span: Span,
        suggestions: Vec<String>,
    ) -> Self {
        Self::UndefinedParameter {
            definition: definition.into(),
            name: name.into(),
            span,
            suggestions,
        }
    }

    pub fn heritage(
        definition: impl Into<String>,
        parameter: impl Into<String>,
        reason: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::HeritageViolation {
            definition: definition.into(),
            parameter: parameter.into(),
            reason: reason.into(),
            span,
        }
    }

    /// Get the source span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::UndefinedReference { span, .. }
            | Self::UndefinedParameter { span, .. }
            | Self::CyclicComposition { span, .. }
            | Self::HeritageViolation { span, .. }
            | Self::DuplicateParameter { span, .. }
            | Self::DuplicateInsertionPoint { span, .. }
            | Self::DuplicateDefinition { span, .. }
            | Self::ArgumentCount { span, .. }
            | Self::TextBodyViolation { span, .. }
            | Self::DuplicateSlotTarget { span, .. }
            | Self::UnknownOption { span, .. }
            | Self::DuplicateOption { span, .. }
            | Self::InvalidIndent { span, .. } => Some(span),
            Self::UnresolvableCollision { .. } => None,
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UndefinedReference { suggestions, .. }
            | Self::UndefinedParameter { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let message = self.to_string();
        let help = self
            .suggestions()
            .filter(|s| !s.is_empty())
            .map(|s| format!("did you mean: {}?", s.join(", ")));
        match self.span() {
            Some(span) => {
                crate::error::render_report(source, filename, span, &message, &message, help)
            }
            None => format!("error: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_reference_display() {
        let err = SemanticError::undefined_reference("page", "heder", 0..5, vec!["header".into()]);
        assert_eq!(
            err.to_string(),
            "undefined definition 'heder' referenced from 'page'"
        );
        assert_eq!(err.suggestions(), Some(&["header".to_string()][..]));
    }

    #[test]
    fn test_cycle_display() {
        let err = SemanticError::CyclicComposition {
            cycle: vec!["a".into(), "b".into(), "a".into()],
            span: 0..1,
        };
        assert!(err.to_string().contains("a -> b -> a"));
    }

    #[test]
    fn test_collision_has_no_span() {
        let err = SemanticError::UnresolvableCollision {
            first: "foo".into(),
            second: "foo".into(),
        };
        assert!(err.span().is_none());
        assert_eq!(
            err.format("", "defs.mg"),
            "error: identifiers 'foo' and 'foo' cannot be made distinct"
        );
    }

    #[test]
    fn test_format_with_help() {
        let source = "macro a { expand heder }";
        let err = SemanticError::undefined_reference("a", "heder", 17..22, vec!["header".into()]);
        let rendered = err.format(source, "defs.mg");
        assert!(rendered.contains("did you mean: header?"));
    }
}
