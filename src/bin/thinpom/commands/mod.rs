//! Command implementations

pub mod coords;
pub mod rewrite;
