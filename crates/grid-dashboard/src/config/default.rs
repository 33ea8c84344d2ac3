//! Default configuration template and file creation utilities.
//!
//! Provides a commented TOML template that matches `Config::default()` and
//! functions to write it to the XDG config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Grid Dashboard Configuration
#
# All values shown below are the built-in defaults.
# Location: $XDG_CONFIG_HOME/grid-dashboard/config.toml

# ==============================================================================
# Layout storage
# ==============================================================================

[storage]

# Directory holding the saved layout.
# Empty means the platform data directory
# ($XDG_DATA_HOME/grid-dashboard or ~/.local/share/grid-dashboard).
# Tilde (~) is expanded to the user's home directory.
dir = ""

# Name the layout is saved under. Change it to keep separate layouts
# for separate dashboards sharing one directory.
key = "dashboard-layout"

# ==============================================================================
# Grid surface
# ==============================================================================

[grid]

# Pixel height of one grid row. Widget heights are in rows.
row_height = 10

# [horizontal, vertical] gap between widgets, in pixels.
margin = [10, 10]

# [horizontal, vertical] padding inside the grid container, in pixels.
container_padding = [10, 10]

# ==============================================================================
# Logging
# ==============================================================================

[logging]

# Verbosity when GDASH_LOG is not set.
# Options: "error", "warn", "info", "debug", "trace"
#   debug - also reports every repair made to a saved layout
level = "warn"
"#;

// ---------------------------------------------------------------------------
// File creation functions
// ---------------------------------------------------------------------------

/// Creates (or force-overwrites) the default config file at the XDG path.
///
/// See [`create_default_config_at`].
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();
    create_default_config_at(&path, force)?;
    Ok(path)
}

/// Writes the default template to `path`.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
pub fn create_default_config_at(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(path)
}

/// Writes the template, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        xdg::ensure_dir(parent).map_err(write_error)?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_error)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::Config;

    #[test]
    fn template_parses_to_defaults() {
        let config: Config =
            toml::from_str(DEFAULT_CONFIG_TEMPLATE).expect("template should be valid TOML");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn creates_file_with_template() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("grid-dashboard").join("config.toml");
        create_default_config_at(&path, false).expect("create");
        let content = fs::read_to_string(&path).expect("read back");
        assert_eq!(content, DEFAULT_CONFIG_TEMPLATE);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[logging]\nlevel = \"debug\"\n").expect("seed");
        let err = create_default_config_at(&path, false).expect_err("should refuse");
        assert!(matches!(err, ConfigError::AlreadyExists { .. }));
        let content = fs::read_to_string(&path).expect("read back");
        assert!(content.contains("debug"), "existing file must be untouched");
    }

    #[test]
    fn force_backs_up_existing_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "# mine\n").expect("seed");
        create_default_config_at(&path, true).expect("force create");
        let backup = dir.path().join("config.toml.backup");
        assert_eq!(fs::read_to_string(backup).expect("backup"), "# mine\n");
        assert_eq!(
            fs::read_to_string(&path).expect("new"),
            DEFAULT_CONFIG_TEMPLATE
        );
    }

    #[cfg(unix)]
    #[test]
    fn created_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("config.toml");
        create_default_config_at(&path, false).expect("create");
        let mode = fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
