//! # kABI Typedef
//!
//! Typedef tables and alias-chain resolution.
//!
//! ## Overview
//!
//! The serializer never expands a typedef by walking the type graph. Instead,
//! when an identifier was declared through a typedef, it asks a
//! [`TypedefSource`] which alias governs it and emits whatever the
//! [`TypedefResolver`] flattens that alias to.
//!
//! ## Key Types
//!
//! - [`TypedefSource`] - Trait the serializer reads typedef information through
//! - [`TypedefTable`] - In-memory implementation, one per compilation unit
//! - [`TypedefResolver`] - Flattens alias chains, cutting cycles
//! - [`AliasDef`] / [`AliasFragment`] - A typedef definition and its parts
//!
//! ## Usage
//!
//! ```rust
//! use kabi_typedef::{AliasDef, AliasFragment, TypedefResolver, TypedefTable};
//!
//! let mut table = TypedefTable::new();
//! table.define_terminal("__u32", &["unsigned int"]).unwrap();
//! table
//!     .define(AliasDef::new("u32", vec![AliasFragment::AliasOf("__u32".into())]))
//!     .unwrap();
//!
//! let resolver = TypedefResolver::new(&table);
//! assert_eq!(resolver.resolve("u32"), vec!["unsigned int"]);
//! ```

pub mod error;
pub mod resolver;
pub mod table;
pub mod traits;

pub use error::{Result, TypedefError};
pub use resolver::TypedefResolver;
pub use table::{TypedefTable, TypedefUse};
pub use traits::{AliasDef, AliasFragment, TypedefSource};
