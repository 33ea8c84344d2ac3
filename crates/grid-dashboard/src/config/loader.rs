//! Reads `config.toml` into [`Config`].
//!
//! A missing file at the default location is not an error: the dashboard
//! runs on built-in defaults until someone runs `gdash config init`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::error::ConfigError;
use crate::config::schema::Config;
use crate::config::xdg;

/// Loads configuration files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Reads and parses the file at `path`, which must exist.
    pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(source) => {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse_toml(&content, path)
    }

    /// Reads the file at the XDG config path, or returns defaults when there
    /// is none.
    pub fn load_default() -> Result<Config, ConfigError> {
        let path = xdg::config_path();
        if !path.is_file() {
            tracing::debug!("No config at {}, using built-in defaults", path.display());
            return Ok(Config::default());
        }
        Self::load_from_path(&path)
    }

    fn parse_toml(content: &str, path: &Path) -> Result<Config, ConfigError> {
        toml::from_str(content).map_err(|e| {
            let (line, column) = e
                .span()
                .map_or((0, 0), |span| line_and_column(content, span.start));
            ConfigError::ParseError {
                path: path.to_path_buf(),
                line,
                column,
                message: e.message().to_string(),
            }
        })
    }
}

/// 1-based line and column of byte `offset` in `content`.
fn line_and_column(content: &str, offset: usize) -> (usize, usize) {
    let before = &content[..offset.min(content.len())];
    let line_start = before.rfind('\n').map_or(0, |nl| nl + 1);
    (before.matches('\n').count() + 1, offset - line_start + 1)
}
