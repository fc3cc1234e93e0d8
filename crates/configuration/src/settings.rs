use serde::Deserialize;
use std::time::Duration;

/// The root configuration structure for the entire application.
///
/// Every section and field has a default, so an empty configuration is valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub strategy: WindowParams,
    pub loader: LoaderSettings,
    pub log: LogSettings,
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// PostgreSQL connection string. Falls back to `DATABASE_URL` when left empty.
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            acquire_timeout_secs: 5,
        }
    }
}

impl DatabaseSettings {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

/// Window lengths of the moving-average crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
#[serde(default)]
pub struct WindowParams {
    /// Number of observations in the short moving average.
    #[cfg_attr(feature = "clap", arg(long, default_value_t = 5))]
    pub short_window: usize,
    /// Number of observations in the long moving average.
    #[cfg_attr(feature = "clap", arg(long, default_value_t = 20))]
    pub long_window: usize,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            short_window: 5,
            long_window: 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderSettings {
    /// Rows per insert batch during a bulk load.
    pub chunk_size: usize,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self { chunk_size: 500 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// An `EnvFilter` directive, used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
