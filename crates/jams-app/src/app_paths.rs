use std::path::PathBuf;

use jams_core::app_dirs::AppDirs;
use jams_core::ports::{AUTH_SESSION_STORAGE_KEY, SIGNUP_FORM_STORAGE_KEY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub signup_state_path: PathBuf,
    pub auth_session_path: PathBuf,
    pub config_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppPaths {
    pub fn from_app_dirs(dirs: &AppDirs) -> Self {
        Self {
            signup_state_path: dirs
                .app_data_root
                .join(format!("{SIGNUP_FORM_STORAGE_KEY}.json")),
            auth_session_path: dirs
                .app_data_root
                .join(format!("{AUTH_SESSION_STORAGE_KEY}.json")),
            config_path: dirs.app_data_root.join("jams.toml"),
            logs_dir: dirs.app_data_root.join("logs"),
        }
    }
}
