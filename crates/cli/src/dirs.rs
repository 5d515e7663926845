//! Platform-specific directory utilities

use std::path::PathBuf;

/// Get the platform-specific data directory for the estimator
///
/// Follows platform conventions:
/// - macOS: `~/Library/Application Support/mwi-profit`
/// - Linux: `~/.local/share/mwi-profit` (or `$XDG_DATA_HOME/mwi-profit`)
/// - Windows: `%APPDATA%\mwi-profit`
/// - Fallback: `./data`
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "mwi-profit")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./data"))
}
