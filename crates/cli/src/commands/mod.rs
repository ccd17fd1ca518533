//! CLI command implementations

pub mod patterns;
pub mod shares;
pub mod simulate;
