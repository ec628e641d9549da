//! CLI command implementations

pub mod clone;

pub use clone::CloneArgs;
