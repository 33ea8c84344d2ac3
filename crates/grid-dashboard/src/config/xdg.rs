//! Where grid-dashboard keeps its files.
//!
//! - `config.toml`: `$XDG_CONFIG_HOME/grid-dashboard`, else
//!   `~/.config/grid-dashboard` on Linux.
//! - Saved layouts: `$XDG_DATA_HOME/grid-dashboard`, else
//!   `~/.local/share/grid-dashboard` on Linux.
//! - On macOS both default to `~/Library/Application Support/grid-dashboard`.
//!
//! The XDG variables win on every platform when set.

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "grid-dashboard";

/// `<base>/grid-dashboard`, where `base` comes from `env_var` if set.
fn app_dir(env_var: &str, platform_base: impl FnOnce() -> PathBuf) -> PathBuf {
    let base = std::env::var_os(env_var)
        .map(PathBuf::from)
        .unwrap_or_else(platform_base);
    base.join(APP_NAME)
}

/// Directory holding `config.toml`.
pub fn config_dir() -> PathBuf {
    app_dir("XDG_CONFIG_HOME", || {
        if cfg!(target_os = "macos") {
            dirs::config_dir().unwrap_or_else(|| PathBuf::from("."))
        } else {
            home_dir().join(".config")
        }
    })
}

/// Full path of `config.toml`.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Default directory for saved layouts when `[storage] dir` is empty.
pub fn data_dir() -> PathBuf {
    app_dir("XDG_DATA_HOME", || {
        if cfg!(target_os = "macos") {
            dirs::data_dir().unwrap_or_else(|| PathBuf::from("."))
        } else {
            home_dir().join(".local").join("share")
        }
    })
}

/// Home directory, or the current directory when it cannot be determined.
fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Replaces a leading `~` or `~/` with the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some("") => home_dir(),
        Some(rest) if rest.starts_with('/') => home_dir().join(&rest[1..]),
        _ => PathBuf::from(path),
    }
}

/// `mkdir -p` that leaves the directory readable by its owner only.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Sets or clears each variable for the duration of `f`.
    fn with_vars<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let saved: Vec<_> = vars
            .iter()
            .map(|(name, _)| (*name, std::env::var_os(name)))
            .collect();
        for (name, value) in vars {
            match value {
                Some(v) => std::env::set_var(name, v),
                None => std::env::remove_var(name),
            }
        }
        f();
        for (name, value) in saved {
            match value {
                Some(v) => std::env::set_var(name, v),
                None => std::env::remove_var(name),
            }
        }
    }

    #[test]
    #[serial]
    fn config_home_override() {
        with_vars(&[("XDG_CONFIG_HOME", Some("/custom/config"))], || {
            assert_eq!(
                config_path(),
                PathBuf::from("/custom/config/grid-dashboard/config.toml")
            );
        });
    }

    #[test]
    #[serial]
    fn data_home_override() {
        with_vars(&[("XDG_DATA_HOME", Some("/custom/data"))], || {
            assert_eq!(data_dir(), PathBuf::from("/custom/data/grid-dashboard"));
        });
    }

    #[test]
    #[serial]
    fn platform_defaults_end_in_app_name() {
        with_vars(&[("XDG_CONFIG_HOME", None), ("XDG_DATA_HOME", None)], || {
            assert!(config_dir().ends_with(APP_NAME));
            assert!(data_dir().ends_with(APP_NAME));
            assert_ne!(config_dir(), data_dir());
        });
    }

    #[test]
    fn tilde_prefix_is_expanded() {
        let home = dirs::home_dir().expect("home dir available in tests");
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde("~/layouts"), home.join("layouts"));
    }

    #[test]
    fn other_paths_are_untouched() {
        assert_eq!(expand_tilde("/srv/layouts"), PathBuf::from("/srv/layouts"));
        assert_eq!(expand_tilde("~bob/layouts"), PathBuf::from("~bob/layouts"));
        assert_eq!(expand_tilde("a/~/b"), PathBuf::from("a/~/b"));
    }

    #[cfg(unix)]
    #[test]
    fn ensure_dir_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).expect("ensure_dir");
        let mode = fs::metadata(&nested).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }
}
