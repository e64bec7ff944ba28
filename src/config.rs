use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::DEFAULT_KEYWORDS;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    /// PostgreSQL connection string. Without one the service runs on an
    /// in-memory catalog.
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
    /// JSON array of case records used to seed the in-memory catalog
    pub seed_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    pub ttl_secs: Option<u64>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_secs: None,
        }
    }
}

fn default_cache_enabled() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Vocabulary for challenge matching
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    /// Store each prospect submission together with its best match
    #[serde(default = "default_record_prospects")]
    pub record_prospects: bool,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            record_prospects: default_record_prospects(),
        }
    }
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}
fn default_record_prospects() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CASEMATCH_)
    /// 5. DATABASE_URL, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CASEMATCH__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        apply_database_url(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        apply_database_url(settings)?.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("CASEMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Let the conventional DATABASE_URL variable override `database.url`
fn apply_database_url(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.is_empty() => Config::builder()
            .add_source(settings)
            .set_override("database.url", url)?
            .build(),
        _ => Ok(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matching() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.keywords.len(), DEFAULT_KEYWORDS.len());
        assert!(matching.record_prospects);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("case-match-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r#"
[server]
port = 9090

[matching]
keywords = ["health", "diet"]
record_prospects = false
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.matching.keywords, vec!["health", "diet"]);
        assert!(!settings.matching.record_prospects);
        assert!(settings.cache.enabled);
    }
}
