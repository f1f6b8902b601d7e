//! Core module - identity, configuration and settings storage

pub mod config;
pub mod identity;
pub mod project;
pub mod sanitize;
pub mod store;

pub use config::Config;
pub use identity::{IdParseError, LocationId};
pub use project::{Project, ProjectError};
pub use sanitize::sanitize_locations;
pub use store::{load_locations, save_locations, FileStore, MemoryStore, SettingsStore, StoreError};
