//! Error types for export processing.

use kabi_core::GraphError;
use kabi_typedef::TypedefError;
use thiserror::Error;

/// Errors that can occur while loading or processing a compilation unit.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The type graph failed validation.
    #[error("invalid type graph: {0}")]
    Graph(#[from] GraphError),

    /// The typedef table is inconsistent.
    #[error("invalid typedef table: {0}")]
    Typedef(#[from] TypedefError),

    /// Reading a unit failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A unit is not valid JSON or does not match the unit schema.
    #[error("malformed unit: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
