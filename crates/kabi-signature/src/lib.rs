//! # kABI Signature
//!
//! Turns a symbol's type graph into the canonical token stream and its
//! CRC-32.
//!
//! ## Key Types
//!
//! - [`TypeSignatureSerializer`] - Recursive walk from a symbol to its checksum
//! - [`SeenSymbolRegistry`] - Cycle guard for named aggregates, scoped to one symbol
//!
//! ## Usage
//!
//! ```rust
//! use kabi_core::{TypeGraph, TypeKind, TypeNode};
//! use kabi_signature::TypeSignatureSerializer;
//! use kabi_typedef::TypedefTable;
//!
//! // void reset(void)
//! let mut graph = TypeGraph::new();
//! let void = graph.add(TypeNode::anonymous(TypeKind::BaseType { name: "void".into() }));
//! let func = graph.add(TypeNode::anonymous(TypeKind::Function { ret: void, params: vec![] }));
//! let reset = graph.add(TypeNode::named("reset", TypeKind::Node { base: func }));
//!
//! let typedefs = TypedefTable::new();
//! let mut serializer = TypeSignatureSerializer::new(&graph, &typedefs).with_transcript();
//! let crc = serializer.checksum_symbol(reset);
//!
//! assert_eq!(serializer.transcript(), Some("void reset ( void ) "));
//! println!("__crc_reset = {crc} ;");
//! ```
//!
//! ## Design Notes
//!
//! - **Never fails**: dangling ids and unknown variants emit nothing
//! - **Isolation**: the cycle guard is cleared before and after every symbol
//! - **Read-only graph**: declarator names are passed down, not written back

pub mod registry;
pub mod serializer;

pub use registry::SeenSymbolRegistry;
pub use serializer::TypeSignatureSerializer;
