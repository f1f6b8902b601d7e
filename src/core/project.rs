//! Project discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::config::DEFAULT_SETTINGS_FILE;

/// Name of the per-project configuration directory
pub const PROJECT_DIR: &str = ".lss";

/// A site project: any directory holding a `.lss/` directory
#[derive(Debug)]
pub struct Project {
    /// Root directory of the project (parent of .lss/)
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current = std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create `.lss/config.yaml` and a starter settings file at `path`
    ///
    /// With `force`, existing files are overwritten.
    pub fn init(path: &Path, force: bool) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let lss_dir = root.join(PROJECT_DIR);
        if lss_dir.exists() && !force {
            return Err(ProjectError::AlreadyExists(root));
        }

        std::fs::create_dir_all(&lss_dir).map_err(|e| ProjectError::IoError(e.to_string()))?;
        std::fs::write(lss_dir.join("config.yaml"), Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        let settings_path = root.join(DEFAULT_SETTINGS_FILE);
        if force || !settings_path.exists() {
            std::fs::write(&settings_path, Self::starter_settings())
                .map_err(|e| ProjectError::IoError(e.to_string()))?;
        }

        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# Local SEO Schema project configuration

# Site home URL, used for locations without their own URL
# site_url: "https://example.com"

# Settings document, relative to this project's root
# settings: lss-settings.yaml

# How acceptsReservations is written: boolean (true/false) or legacy ("True"/"False")
# reservations: boolean
"#
    }

    fn starter_settings() -> &'static str {
        r#"# Business locations, keyed by id, in output order.
#
# Required per location: name, address_street, address_locality,
# address_region, address_postalcode, address_country.
# Opening hours use HH:MM-HH:MM ranges separated by commas, or "closed".
#
# local_seo_schema_locations:
#   loc_main:
#     name: Corner Cafe
#     type: CafeOrCoffeeShop
#     address_street: 1 Main St
#     address_locality: Springfield
#     address_region: IL
#     address_postalcode: "62701"
#     address_country: US
#     opening_hours:
#       Mo: 08:00-16:00
#       Sa: closed
#     serves_cuisine: Coffee, Pastries
#     accepts_reservations: "False"
local_seo_schema_locations: {}
"#
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .lss configuration directory
    pub fn lss_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    pub fn config_path(&self) -> PathBuf {
        self.lss_dir().join("config.yaml")
    }

    /// Resolve a settings path against the project root unless absolute
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not an lss project (searched from {searched_from:?}). Run 'lss init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("lss project already exists at {0:?} (use --force to overwrite)")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}
