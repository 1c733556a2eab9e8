use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub recommendation: RecommendationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid server address {}: {}", addr, e))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            workers: num_cpus::get(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub source: CatalogSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogSource {
    /// JSON array of items read once at startup.
    Static { path: PathBuf },
    /// Catalog service queried on every request.
    Http { url: String, timeout_secs: u64 },
}

impl Default for CatalogSource {
    fn default() -> Self {
        CatalogSource::Http {
            url: "http://localhost:5000/api/items".to_string(),
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    /// Used when a request omits `topN`.
    pub default_top_n: usize,
    /// Candidate count at which scoring moves onto the rayon pool.
    pub parallel_scoring_threshold: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            default_top_n: 10,
            parallel_scoring_threshold: crate::algorithms::ranker::DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Layers a config file and `RANKWISE__SECTION__KEY` environment variables over the defaults.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("RANKWISE").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Loads `path` when it exists, otherwise falls back to the defaults.
    ///
    /// Nothing is logged here: this runs before tracing is initialised, so
    /// callers log the returned [`ConfigOrigin`] once the subscriber is up.
    pub fn load(path: &str) -> anyhow::Result<(Self, ConfigOrigin)> {
        if std::path::Path::new(path).exists() {
            Ok((Self::from_file(path)?, ConfigOrigin::File))
        } else {
            Ok((Self::default(), ConfigOrigin::Defaults))
        }
    }
}

/// Whether [`Config::load`] read a file or fell back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    File,
    Defaults,
}

impl ConfigOrigin {
    pub fn log(self, path: &str) {
        match self {
            ConfigOrigin::File => tracing::info!(path, "Loaded configuration file"),
            ConfigOrigin::Defaults => {
                tracing::info!(path, "Config file not found, using default configuration")
            }
        }
    }
}
