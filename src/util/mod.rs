//! Shared utilities

pub mod config;
pub mod diagnostic;

pub use config::{Overrides, THIN_ROOT};
pub use diagnostic::{Diagnostic, MalformedCoordinateError};
