//! Errors raised by misuse of the untyped runtime API

use thiserror::Error;

/// Errors that can occur while building an instance tree
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("unknown template #{index}")]
    UnknownTemplate { index: usize },

    #[error("no instance #{index} in this tree")]
    UnknownInstance { index: usize },

    /// Handle minted by another document
    #[error("handle to instance #{index} belongs to another document")]
    ForeignHandle { index: usize },

    #[error("template '{template}' cannot be constructed without a parent")]
    NotTopLevel { template: String },

    #[error("'{parent}' has no factory for '{target}'")]
    NoSuchFactory { parent: String, target: String },

    #[error("'{template}' expects {expected} {what}(s), got {found}")]
    ArgumentCount {
        template: String,
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("insertion point '{name}' of '{template}' is required")]
    MissingInsertion { template: String, name: String },

    #[error("no ancestor of '{template}' declares '{source_name}'")]
    UnresolvedHeritage {
        template: String,
        source_name: String,
    },
}

impl RuntimeError {
    pub fn argument_count(
        template: impl Into<String>,
        what: &'static str,
        expected: usize,
        found: usize,
    ) -> Self {
        Self::ArgumentCount {
            template: template.into(),
            what,
            expected,
            found,
        }
    }
}
