//! Error types for typedef tables.

use thiserror::Error;

/// Errors that can occur while building a typedef table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypedefError {
    /// The same alias name was defined twice.
    #[error("typedef {0} is already defined")]
    DuplicateAlias(String),

    /// A definition with nothing to expand to.
    #[error("typedef {0} has an empty definition")]
    EmptyDefinition(String),
}

/// Result type for typedef operations.
pub type Result<T> = std::result::Result<T, TypedefError>;
