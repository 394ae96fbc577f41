//! CLI command implementations

pub mod dump;
pub mod property;
pub mod validate;
