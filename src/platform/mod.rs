// Autoclick platform abstraction
// Provides platform-specific paths for Windows, macOS, and Linux.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Environment variable overriding where the database lives.
pub const DATA_DIR_ENV: &str = "AUTOCLICK_DATA_DIR";

/// Returns the platform-specific configuration directory.
///
/// - **Linux**: `~/.config/autoclick` (or `$XDG_CONFIG_HOME/autoclick`)
/// - **macOS**: `~/Library/Application Support/Autoclick`
/// - **Windows**: `%APPDATA%/Autoclick`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the platform-specific data directory.
///
/// - **Linux**: `~/.local/share/autoclick` (or `$XDG_DATA_HOME/autoclick`)
/// - **macOS**: `~/Library/Application Support/Autoclick`
/// - **Windows**: `%APPDATA%/Autoclick`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}

/// Path of the SQLite database: `$AUTOCLICK_DATA_DIR/autoclick.db`, falling
/// back to the platform data directory.
pub fn get_database_path() -> PathBuf {
    match std::env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir).join("autoclick.db"),
        _ => get_data_dir().join("autoclick.db"),
    }
}
