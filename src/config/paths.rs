//! Config file path resolution: home directory and `~` expansion.

use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// Default location of the configuration file, before `~` expansion.
pub const DEFAULT_CONFIG_FILE: &str = "~/.multitool_config.yaml";

/// Home directory of the current user, if one can be determined.
pub fn home_dir() -> Option<PathBuf> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
}

/// Expand a leading `~` to the home directory. Other paths are returned as-is.
pub fn expand_home(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match home_dir() {
        Some(home) if rest.as_os_str().is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Default config file path with the home directory expanded.
pub fn default_config_path() -> PathBuf {
    expand_home(DEFAULT_CONFIG_FILE)
}
