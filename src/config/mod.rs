//! Configuration management for pydoc-scraper.
//!
//! Configuration is read from `~/.config/pydoc-scraper/config.toml` at startup
//! (or from the path given with `--config`). If the default file doesn't exist,
//! a default configuration with comments is created.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetcher::parallel::DEFAULT_WORKERS;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub cache: CacheConfig,
    pub paths: PathsConfig,
    pub urls: UrlConfig,
}

/// HTTP client settings shared by every mode.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// Maximum detail pages fetched concurrently (default: 4)
    pub workers: usize,

    pub retry: RetryConfig,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("pydoc-scraper/", env!("CARGO_PKG_VERSION")).to_string(),
            workers: DEFAULT_WORKERS,
            retry: RetryConfig::default(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Exponential backoff settings applied to every fetch.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt (default: 5)
    pub max_attempts: u32,

    /// Delay before the first retry in milliseconds (default: 1000)
    pub initial_delay_ms: u64,

    /// Multiplier applied to the delay after each retry (default: 2.0)
    pub backoff_multiplier: f64,

    /// Upper bound for a single delay in milliseconds (default: 30000)
    pub max_delay_ms: u64,

    /// HTTP statuses worth retrying
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay_ms: 1000,
            backoff_multiplier: 2.0,
            max_delay_ms: 30_000,
            retry_statuses: vec![500, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

/// Local HTTP response cache.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,

    /// Cache directory (default: `<cache dir>/pydoc-scraper/http`)
    pub dir: Option<PathBuf>,

    /// Entry lifetime in seconds; entries never expire when unset
    pub ttl_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
            ttl_secs: None,
        }
    }
}

impl CacheConfig {
    pub fn resolve_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.dir {
            Some(dir) => Ok(dir.clone()),
            None => {
                let cache_dir = dirs::cache_dir().ok_or(ConfigError::NoCacheDir)?;
                Ok(cache_dir.join("pydoc-scraper").join("http"))
            }
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }
}

/// Where results, downloads and logs are written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub base_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
        }
    }
}

impl PathsConfig {
    pub fn results_dir(&self) -> PathBuf {
        self.base_dir.join("results")
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.base_dir.join("downloads")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }
}

/// Entry points of the scraped sites.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UrlConfig {
    pub docs: String,
    pub peps: String,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            docs: "https://docs.python.org/3/".to_string(),
            peps: "https://peps.python.org/".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default path when `None`.
    ///
    /// If the default config file doesn't exist, creates one with comments.
    /// An explicit path that doesn't exist is an error.
    /// Missing fields in the config file will use default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = Self::default_config_path()?;
                if !p.exists() {
                    Self::create_default_config(&p)?;
                    return Ok(Self::default());
                }
                p
            }
        };

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/pydoc-scraper/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("pydoc-scraper").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> &'static str {
        r##"# pydoc-scraper configuration

[http]
# Per-request timeout in seconds
timeout_secs = 30

# Maximum detail pages fetched at once (1 = strictly sequential)
workers = 4

[http.retry]
# Retries after the first attempt
max_attempts = 5

# Exponential backoff: initial delay, multiplier and cap
initial_delay_ms = 1000
backoff_multiplier = 2.0
max_delay_ms = 30000

# Server errors worth retrying
retry_statuses = [500, 502, 503, 504]

[cache]
enabled = true

# Uncomment to override the cache location
# dir = "/tmp/pydoc-scraper"

# Uncomment to expire cached pages (seconds)
# ttl_secs = 86400

[paths]
# results/, downloads/ and logs/ are created here
base_dir = "."

[urls]
docs = "https://docs.python.org/3/"
peps = "https://peps.python.org/"
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Could not determine cache directory")]
    NoCacheDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let config: Config = toml::from_str(Config::default_config_content())
            .expect("Default config should be valid TOML");

        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.http.workers, 4);
        assert_eq!(config.http.retry.retry_statuses, vec![500, 502, 503, 504]);
        assert_eq!(config.urls.peps, "https://peps.python.org/");
        assert!(config.cache.ttl_secs.is_none());
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[http.retry]
max_attempts = 2

[paths]
base_dir = "/tmp/out"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.http.retry.max_attempts, 2);
        assert_eq!(config.http.retry.initial_delay(), Duration::from_secs(1));
        assert_eq!(config.paths.results_dir(), PathBuf::from("/tmp/out/results"));
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");

        assert!(config.cache.enabled);
        assert_eq!(config.urls.docs, "https://docs.python.org/3/");
        assert_eq!(config.paths.downloads_dir(), PathBuf::from("./downloads"));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[cache]\nttl_secs = 60\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.cache.ttl(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[http]\ntimeout_secs = \"soon\"\n").unwrap();

        match Config::load(Some(&path)) {
            Err(ConfigError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_explicit_cache_dir() {
        let cache = CacheConfig {
            dir: Some(PathBuf::from("/tmp/c")),
            ..CacheConfig::default()
        };
        assert_eq!(cache.resolve_dir().unwrap(), PathBuf::from("/tmp/c"));
    }
}
