//! # kABI Testkit
//!
//! Testing utilities for the kABI checksum workspace.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Declarations with their pinned token streams and CRCs
//! - **Generators**: Proptest strategies for random structs and typedef tables
//! - **Fixtures**: A builder for small compilation units
//!
//! ## Golden Vectors
//!
//! ```rust
//! use kabi_testkit::vectors::{all_vectors, run_vector};
//!
//! for vector in all_vectors() {
//!     let (_, crc) = run_vector(&vector).unwrap();
//!     println!("{}: {}", vector.name, crc.to_hex());
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use kabi_testkit::generators::{fixture_from_params, StructParams};
//!
//! proptest! {
//!     #[test]
//!     fn units_validate(params: StructParams) {
//!         let (unit, _) = fixture_from_params(&params);
//!         prop_assert!(kabi_core::validate_graph(&unit.graph, &unit.symbols).is_ok());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use kabi_testkit::fixtures::UnitFixture;
//!
//! let mut unit = UnitFixture::new("add.c");
//! let int = unit.base("int");
//! let x = unit.bind("x", int);
//! let func = unit.function(int, vec![x]);
//! unit.exported("inc", func);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{UnitFixture, MARKER_PREFIX};
pub use generators::{fixture_from_params, MemberType, StructParams};
pub use vectors::{all_vectors, run_vector, verify_all_vectors, GoldenVector};
