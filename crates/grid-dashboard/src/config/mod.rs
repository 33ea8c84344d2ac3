//! `config.toml` handling: where it lives, what it holds, how it is read
//! and how the commented template is written.

/// `config init` template and writer.
pub mod default;

/// Errors for config reading and writing.
pub mod error;

/// Reads `config.toml` into [`schema::Config`].
pub mod loader;

/// Config sections and their defaults.
pub mod schema;

/// XDG config and data directory resolution.
pub mod xdg;
