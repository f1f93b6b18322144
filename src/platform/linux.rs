// Autoclick platform paths for Linux
// Config: ~/.config/autoclick
// Data:   ~/.local/share/autoclick

use std::env;
use std::path::PathBuf;

fn resolve(xdg: Option<String>, home: Option<String>, fallback: &[&str]) -> PathBuf {
    match xdg {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir).join("autoclick"),
        _ => {
            let mut path = PathBuf::from(home.unwrap_or_else(|| String::from("/tmp")));
            for part in fallback {
                path.push(part);
            }
            path.join("autoclick")
        }
    }
}

/// Uses `$XDG_CONFIG_HOME/autoclick` if set, otherwise `~/.config/autoclick`.
pub fn get_config_dir() -> PathBuf {
    resolve(env::var("XDG_CONFIG_HOME").ok(), env::var("HOME").ok(), &[".config"])
}

/// Uses `$XDG_DATA_HOME/autoclick` if set, otherwise `~/.local/share/autoclick`.
pub fn get_data_dir() -> PathBuf {
    resolve(
        env::var("XDG_DATA_HOME").ok(),
        env::var("HOME").ok(),
        &[".local", "share"],
    )
}
