//! # Configuration Crate
//!
//! Strongly-typed application settings, layered from an optional `config.toml`, then
//! `APP__`-prefixed environment variables (e.g. `APP__SERVER__PORT=8080`), then the
//! `DATABASE_URL` variable for the connection string.

use crate::error::ConfigError;
use config::{Environment, File, FileFormat};

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    DatabaseSettings, LoaderSettings, LogSettings, ServerSettings, Settings, WindowParams,
};

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Loads the application settings from `config.toml` (if present) and the environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(DEFAULT_CONFIG_FILE)
}

/// Loads the application settings from the file at `path` (if present) and the environment.
pub fn load_settings_from(path: &str) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(File::with_name(path).required(false))
        // The prefix is `APP`, separator is `__`.
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut settings = builder.try_deserialize::<Settings>()?;
    if settings.database.url.is_empty() {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            settings.database.url = url;
        }
    }

    validate(&settings)?;
    tracing::debug!(server = ?settings.server, strategy = ?settings.strategy, "Loaded settings");
    Ok(settings)
}

/// Parses settings from a TOML document, without consulting the environment.
pub fn parse_settings(toml: &str) -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize::<Settings>()?;
    validate(&settings)?;
    Ok(settings)
}

/// Rejects settings the application cannot run with.
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    let windows = settings.strategy;
    if windows.short_window < 1 || windows.long_window < 1 {
        return Err(ConfigError::ValidationError(format!(
            "strategy windows must be at least 1 (short_window={}, long_window={})",
            windows.short_window, windows.long_window
        )));
    }
    if settings.loader.chunk_size < 1 {
        return Err(ConfigError::ValidationError(
            "loader.chunk_size must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings.server.address(), "0.0.0.0:8000");
        assert_eq!(settings.database.max_connections, 10);
        assert_eq!(settings.database.acquire_timeout().as_secs(), 5);
        assert_eq!(settings.strategy, WindowParams { short_window: 5, long_window: 20 });
        assert_eq!(settings.loader.chunk_size, 500);
        assert_eq!(settings.log.filter, "info");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let settings = parse_settings(
            r#"
            [server]
            port = 9090

            [strategy]
            long_window = 50
            "#,
        )
        .unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.strategy.short_window, 5);
        assert_eq!(settings.strategy.long_window, 50);
    }

    #[test]
    fn zero_windows_fail_validation() {
        let err = parse_settings("[strategy]\nshort_window = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn zero_chunk_size_fails_validation() {
        let err = parse_settings("[loader]\nchunk_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn malformed_values_are_load_errors() {
        let err = parse_settings("[server]\nport = \"not-a-port\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}
