//! Test utilities for thinpom unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use thinpom::test_support::ManifestFixture;
//!
//! #[test]
//! fn test_example() {
//!     let manifest = ManifestFixture::with_dependencies(&["com.acme:lib:1.0"])
//!         .parent("com.acme", "parent", "1.0")
//!         .build();
//!
//!     // Rewrite the manifest...
//! }
//! ```

pub mod fixtures;

pub use fixtures::*;
