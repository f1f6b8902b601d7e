//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::project::Project;
use crate::schema::builder::{BuildOptions, ReservationStyle};

/// Settings document used when nothing else is configured
pub const DEFAULT_SETTINGS_FILE: &str = "lss-settings.yaml";

/// lss configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site home URL, the fallback for locations without their own URL
    pub site_url: Option<String>,

    /// Path to the settings document
    pub settings: Option<PathBuf>,

    /// How acceptsReservations is emitted
    pub reservations: Option<ReservationStyle>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Global user config (~/.config/lss/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 2. Project config (.lss/config.yaml), settings relative to the project root
        if let Ok(project) = Project::discover() {
            if let Some(mut project_config) = Self::read_file(&project.config_path()) {
                project_config.settings = project_config.settings.map(|p| project.resolve(&p));
                config.merge(project_config);
            }
            if config.settings.is_none() {
                config.settings = Some(project.resolve(Path::new(DEFAULT_SETTINGS_FILE)));
            }
        }

        // 3. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "lss")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
                None
            }
        }
    }

    /// Overlay `LSS_SITE_URL`, `LSS_SETTINGS` and `LSS_RESERVATIONS`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("LSS_SITE_URL").filter(|v| !v.is_empty()) {
            self.site_url = Some(url);
        }
        if let Some(path) = lookup("LSS_SETTINGS").filter(|v| !v.is_empty()) {
            self.settings = Some(PathBuf::from(path));
        }
        if let Some(style) = lookup("LSS_RESERVATIONS") {
            match style.parse() {
                Ok(style) => self.reservations = Some(style),
                Err(e) => tracing::warn!(value = %style, "ignoring LSS_RESERVATIONS: {}", e),
            }
        }
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.site_url.is_some() {
            self.site_url = other.site_url;
        }
        if other.settings.is_some() {
            self.settings = other.settings;
        }
        if other.reservations.is_some() {
            self.reservations = other.reservations;
        }
    }

    /// Settings document path, falling back to `lss-settings.yaml`
    pub fn settings_path(&self) -> PathBuf {
        self.settings
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Builder options for this configuration
    pub fn build_options(&self) -> BuildOptions {
        let mut options = BuildOptions::default()
            .with_reservations(self.reservations.unwrap_or_default());
        if let Some(url) = self.site_url.as_deref().filter(|u| !u.is_empty()) {
            options = options.with_site_url(url);
        }
        options
    }
}
