//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML → DTO mapping
//!
//! ## Prohibited
//!
//! - No business logic or policies
//! - No validation logic
//! - No default value calculation
//!
//! > **This module contains data only, no policy, no validation.**

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the hosted identity service (may be empty - this is a fact, not an error)
    pub supabase_url: String,

    /// Public anon key sent as `apikey` on every identity request
    pub supabase_anon_key: String,

    /// Directory holding persisted wizard state (path info only, no existence check)
    pub data_dir: PathBuf,

    /// Transport timeout for identity requests, in seconds (0 means "no timeout")
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation
    /// or default value logic. Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            supabase_url: toml_value
                .get("identity")
                .and_then(|i| i.get("url"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            supabase_anon_key: toml_value
                .get("identity")
                .and_then(|i| i.get("anon_key"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            data_dir: PathBuf::from(
                toml_value
                    .get("storage")
                    .and_then(|s| s.get("data_dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            request_timeout_secs: toml_value
                .get("identity")
                .and_then(|i| i.get("request_timeout_secs"))
                .and_then(|v| v.as_integer())
                .and_then(|v| u64::try_from(v).ok())
                .unwrap_or(0),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            data_dir: PathBuf::new(),
            request_timeout_secs: 0,
        }
    }

    /// Create AppConfig rooted at a data directory computed by the caller
    /// (e.g. with the `dirs` crate).
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Self::empty()
        }
    }
}
