//! Errors raised while reading, parsing or writing `config.toml`.

use std::path::PathBuf;
use thiserror::Error;

/// Why the dashboard configuration could not be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Cannot read config {path}")]
    ReadError {
        /// File that failed.
        path: PathBuf,
        /// I/O cause.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the schema.
    #[error("Invalid config {path}:{line}:{column}: {message}")]
    ParseError {
        /// File that failed.
        path: PathBuf,
        /// 1-based line, or 0 when the parser gave no position.
        line: usize,
        /// 1-based column, or 0 when the parser gave no position.
        column: usize,
        /// Parser message.
        message: String,
    },

    /// A config path given explicitly does not exist.
    #[error("No config file at {path}")]
    NotFound {
        /// Missing file.
        path: PathBuf,
    },

    /// `config init` without `--force` found a file in the way.
    #[error("Config {path} already exists (use --force to replace it)")]
    AlreadyExists {
        /// Existing file.
        path: PathBuf,
    },

    /// Writing the template or its backup failed.
    #[error("Cannot write config {path}")]
    WriteError {
        /// File that failed.
        path: PathBuf,
        /// I/O cause.
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn parse_error_shows_position() {
        let err = ConfigError::ParseError {
            path: PathBuf::from("config.toml"),
            line: 3,
            column: 14,
            message: "invalid type: string \"wide\", expected an array".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid config config.toml:3:14: invalid type: string \"wide\", expected an array"
        );
    }

    #[test]
    fn already_exists_suggests_force() {
        let err = ConfigError::AlreadyExists {
            path: PathBuf::from("/home/me/.config/grid-dashboard/config.toml"),
        };
        let msg = err.to_string();
        assert!(msg.contains("already exists"));
        assert!(msg.contains("--force"));
    }

    #[test]
    fn io_variants_keep_their_cause() {
        let read = ConfigError::ReadError {
            path: PathBuf::from("config.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let write = ConfigError::WriteError {
            path: PathBuf::from("config.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        };
        assert!(read.source().is_some());
        assert!(write.source().is_some());
        assert!(read.to_string().contains("config.toml"));
    }
}
