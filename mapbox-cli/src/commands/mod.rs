//! CLI command implementations.

pub mod compose;
pub mod tileset;
