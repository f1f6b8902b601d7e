//! Shared helper functions for CLI commands

use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::config::Config;
use crate::core::store::FileStore;

/// Layered configuration with the global flags applied last
pub fn load_config(global: &GlobalOpts) -> Config {
    let mut config = Config::load();
    apply_flags(&mut config, global);
    config
}

fn apply_flags(config: &mut Config, global: &GlobalOpts) {
    config.merge(Config {
        site_url: global.site_url.clone(),
        settings: global.settings.clone(),
        reservations: None,
    });
}

/// Store for the configured settings document
pub fn open_store(config: &Config) -> FileStore {
    let path: PathBuf = config.settings_path();
    tracing::debug!(path = %path.display(), "using settings document");
    FileStore::new(path)
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
