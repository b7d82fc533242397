use std::path::PathBuf;

/// Resolved per-user directories. Pure fact container, nothing is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub app_data_root: PathBuf,
}
