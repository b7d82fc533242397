//! # Configuration Loader
//!
//! - Read `jams.toml` into the [`AppConfig`] DTO
//! - Layer `.env` / process environment overrides on top
//! - Fill the data directory from the platform default when the file leaves it empty
//!
//! No validation happens here. An empty identity URL is a fact; the identity
//! adapter reports it when a command actually needs the service.

use std::path::{Path, PathBuf};

use anyhow::Context;
use jams_app::AppPaths;
use jams_core::app_dirs::AppDirs;
use jams_core::config::AppConfig;

pub const ENV_SUPABASE_URL: &str = "JAMS_SUPABASE_URL";
pub const ENV_SUPABASE_ANON_KEY: &str = "JAMS_SUPABASE_ANON_KEY";
pub const ENV_DATA_DIR: &str = "JAMS_DATA_DIR";

/// Load configuration from a TOML file.
///
/// Missing sections and keys become empty values.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Overlay environment values onto `config`. Empty variables are ignored.
pub fn apply_env_overrides(
    mut config: AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> AppConfig {
    let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

    if let Some(url) = get(ENV_SUPABASE_URL) {
        config.supabase_url = url;
    }
    if let Some(key) = get(ENV_SUPABASE_ANON_KEY) {
        config.supabase_anon_key = key;
    }
    if let Some(dir) = get(ENV_DATA_DIR) {
        config.data_dir = PathBuf::from(dir);
    }
    config
}

/// Resolve the effective configuration.
///
/// An explicit `config_path` must exist. Without one, `jams.toml` in the app
/// data directory is used if present, otherwise an empty config rooted at
/// that directory.
pub fn resolve_config(
    config_path: Option<&Path>,
    app_dirs: &AppDirs,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<AppConfig> {
    let default_path = AppPaths::from_app_dirs(app_dirs).config_path;

    let mut config = match config_path {
        Some(path) => load_config(path)?,
        None if default_path.exists() => load_config(&default_path)?,
        None => AppConfig::with_system_defaults(app_dirs.app_data_root.clone()),
    };

    if config.data_dir.as_os_str().is_empty() {
        config.data_dir = app_dirs.app_data_root.clone();
    }

    Ok(apply_env_overrides(config, lookup))
}

/// Process environment lookup, after loading `.env` from the working directory.
pub fn process_env() -> impl Fn(&str) -> Option<String> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            eprintln!("Failed to load .env: {err}");
        }
    }
    |key: &str| std::env::var(key).ok()
}
