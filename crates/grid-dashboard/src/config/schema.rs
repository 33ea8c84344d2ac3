//! TOML configuration schema types for the grid dashboard.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so a partial or empty file is valid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::xdg;
use crate::storage::LAYOUT_STORAGE_KEY;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// Corresponds to the full TOML file structure:
/// ```toml
/// [storage]
/// [grid]
/// [logging]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where the layout is persisted.
    pub storage: StorageConfig,
    /// Grid spacing handed to the rendering surface.
    pub grid: GridConfig,
    /// Log verbosity.
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Layout persistence settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for saved layouts. Empty means the platform data dir.
    /// Tilde (`~`) is expanded.
    pub dir: String,
    /// Key the layout is stored under.
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: String::new(),
            key: LAYOUT_STORAGE_KEY.to_string(),
        }
    }
}

impl StorageConfig {
    /// The storage directory with defaults and `~` applied.
    pub fn resolved_dir(&self) -> PathBuf {
        if self.dir.is_empty() {
            xdg::data_dir()
        } else {
            xdg::expand_tilde(&self.dir)
        }
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Grid spacing settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Pixel height of one grid row.
    pub row_height: u32,
    /// `[horizontal, vertical]` gap between widgets in pixels.
    pub margin: [u32; 2],
    /// `[horizontal, vertical]` padding inside the grid container in pixels.
    pub container_padding: [u32; 2],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_height: 10,
            margin: [10, 10],
            container_padding: [10, 10],
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Verbosity used when `GDASH_LOG` is unset.
    pub level: LogLevel,
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings (default).
    #[default]
    Warn,
    /// Informational messages.
    Info,
    /// Debug-level detail, including layout repairs.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// The level as a `tracing` filter directive.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
