//! Command implementations

pub mod completions;
pub mod init;
pub mod location;
pub mod render;
pub mod types;
pub mod validate;
