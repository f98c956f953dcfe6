//! XDG-style path utilities for configuration and session data.
//!
//! Paths prefer XDG Base Directory conventions over OS-specific
//! locations, so the same layout is used on Linux and macOS.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "sxudo";

/// Returns the configuration directory for sxudo.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/sxudo` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/sxudo` otherwise
pub fn config_dir() -> Result<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// Returns the data directory holding the session database.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/sxudo` if `XDG_DATA_HOME` is set
/// 2. `~/.local/share/sxudo` otherwise
pub fn data_dir() -> Result<PathBuf> {
    xdg_dir("XDG_DATA_HOME", ".local/share")
}

fn xdg_dir(env_var: &str, home_relative: &str) -> Result<PathBuf> {
    match std::env::var(env_var) {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join(APP_DIR)),
        _ => Ok(home_dir()?.join(home_relative).join(APP_DIR)),
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_env<F: FnOnce()>(key: &str, value: Option<&str>, f: F) {
        let original = std::env::var(key).ok();
        match value {
            Some(v) => unsafe { std::env::set_var(key, v) },
            None => unsafe { std::env::remove_var(key) },
        }

        f();

        match original {
            Some(v) => unsafe { std::env::set_var(key, v) },
            None => unsafe { std::env::remove_var(key) },
        }
    }

    #[test]
    #[serial]
    fn test_config_dir_default() {
        with_env("XDG_CONFIG_HOME", None, || {
            let dir = config_dir().unwrap();
            assert!(dir.ends_with(".config/sxudo"));
        });
    }

    #[test]
    #[serial]
    fn test_config_dir_xdg_override() {
        with_env("XDG_CONFIG_HOME", Some("/custom/config"), || {
            assert_eq!(
                config_dir().unwrap(),
                PathBuf::from("/custom/config/sxudo")
            );
        });
    }

    #[test]
    #[serial]
    fn test_config_dir_empty_xdg_falls_back() {
        with_env("XDG_CONFIG_HOME", Some(""), || {
            assert!(config_dir().unwrap().ends_with(".config/sxudo"));
        });
    }

    #[test]
    #[serial]
    fn test_data_dir_default() {
        with_env("XDG_DATA_HOME", None, || {
            assert!(data_dir().unwrap().ends_with(".local/share/sxudo"));
        });
    }

    #[test]
    #[serial]
    fn test_data_dir_xdg_override() {
        with_env("XDG_DATA_HOME", Some("/custom/data"), || {
            assert_eq!(data_dir().unwrap(), PathBuf::from("/custom/data/sxudo"));
        });
    }
}
