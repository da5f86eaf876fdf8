//! # kABI Export
//!
//! Exported-symbol checksums for whole compilation units, in the
//! `__crc_<name> = 0x<crc> ;` format consumed by module versioning tools.
//!
//! ## Overview
//!
//! A C front-end hands over each source file as a [`CompilationUnit`]: a
//! type graph, the file's top-level symbols and its typedef table. Symbols
//! named `__ksymtab_<name>` mark `<name>` as exported. The [`ExportWalker`]
//! checksums every exported symbol in declaration order.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kabi_export::{ExportConfig, ExportWalker};
//!
//! let walker = ExportWalker::new(ExportConfig::default());
//! for crc in walker.process_path("lib/add.json").unwrap() {
//!     println!("{crc}");
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `kabi_export::core` - Type graph and checksum primitives
//! - `kabi_export::typedef` - Typedef tables
//! - `kabi_export::signature` - The signature serializer

pub mod config;
pub mod error;
pub mod output;
pub mod unit;
pub mod walker;

// Re-export component crates
pub use kabi_core as core;
pub use kabi_signature as signature;
pub use kabi_typedef as typedef;

pub use config::{ExportConfig, DEFAULT_CRC_PREFIX, DEFAULT_MARKER_PREFIX};
pub use error::{ExportError, Result};
pub use output::SymbolCrc;
pub use unit::CompilationUnit;
pub use walker::ExportWalker;

pub use kabi_core::{Checksum, NodeId, TypeGraph, TypeKind, TypeNode};
pub use kabi_typedef::{AliasDef, AliasFragment, TypedefTable};
