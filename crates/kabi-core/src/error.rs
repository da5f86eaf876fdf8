//! Error types for kABI core.

use thiserror::Error;

use crate::graph::NodeId;

/// Structural problems found in a type graph before it is serialized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node {node} references missing node {target}")]
    DanglingReference { node: NodeId, target: NodeId },

    #[error("top-level symbol {0} is not in the graph")]
    MissingSymbol(NodeId),

    #[error("top-level symbol {0} has no identifier")]
    MissingIdentifier(NodeId),

    #[error("enum {0} has an empty enumerator name")]
    EmptyEnumerator(NodeId),

    #[error("cycle through {0} is not broken by a named struct or union")]
    UnguardedCycle(NodeId),
}

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
