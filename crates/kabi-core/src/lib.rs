//! # kABI Core
//!
//! Pure primitives for kernel-ABI symbol checksums: the type graph, the
//! rolling CRC-32 accumulator, and the type-keyword lookup.
//!
//! This crate contains no I/O. It is pure computation over a type graph that
//! an external C front-end has already parsed and resolved.
//!
//! ## Key Types
//!
//! - [`TypeGraph`] - Arena of [`TypeNode`]s for one compilation unit
//! - [`TypeKind`] - Closed set of node variants (pointer, struct, function, ...)
//! - [`ChecksumAccumulator`] - genksyms-compatible CRC-32 over a token stream
//! - [`Checksum`] - A finalized 32-bit symbol checksum
//!
//! ## Validation
//!
//! Graphs from untrusted front-ends should pass [`validate_graph`] before
//! they are serialized. See [`validation`] module.

pub mod checksum;
pub mod error;
pub mod graph;
pub mod keyword;
pub mod validation;

pub use checksum::{Checksum, ChecksumAccumulator, CRC_INIT};
pub use error::{GraphError, Result};
pub use graph::{NodeId, SymbolKind, TypeGraph, TypeKind, TypeNode};
pub use keyword::type_keyword;
pub use validation::validate_graph;
