use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub elasticsearch: ElasticsearchSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            elasticsearch: ElasticsearchSettings::default(),
            search: SearchSettings::default(),
            auth: AuthSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
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
fn default_port() -> u16 { 10000 }

#[derive(Debug, Clone, Deserialize)]
pub struct ElasticsearchSettings {
    #[serde(default = "default_es_host")]
    pub host: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_true")]
    pub retry_on_timeout: bool,
}

impl Default for ElasticsearchSettings {
    fn default() -> Self {
        Self {
            host: default_es_host(),
            username: String::new(),
            password: String::new(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_on_timeout: true,
        }
    }
}

fn default_es_host() -> String { "http://localhost:9200".to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_max_retries() -> u32 { 3 }
fn default_true() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_index_pattern")]
    pub default_index_pattern: String,
    /// When true, a single malformed hit fails the whole request instead of
    /// being skipped.
    #[serde(default)]
    pub strict_hits: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_index_pattern: default_index_pattern(),
            strict_hits: false,
        }
    }
}

fn default_index_pattern() -> String { "fbus*,smfb*,smfbgermania*".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    #[serde(default = "default_api_username")]
    pub username: String,
    #[serde(default = "default_api_password")]
    pub password: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            username: default_api_username(),
            password: default_api_password(),
        }
    }
}

fn default_api_username() -> String { "admin".to_string() }
fn default_api_password() -> String { "admin123".to_string() }

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
    /// 2. Configuration file (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with PEOPLE_)
    /// 4. Well-known flat environment variables (ES_HOST, API_USERNAME, ...)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with PEOPLE_)
            // e.g., PEOPLE_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("PEOPLE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PEOPLE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Override config values from the flat environment variables the service
/// has historically been deployed with.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(host) = env::var("ES_HOST") {
        builder = builder.set_override("elasticsearch.host", host)?;
    }
    if let Ok(user) = env::var("ES_USER") {
        builder = builder.set_override("elasticsearch.username", user)?;
    }
    if let Ok(password) = env::var("ES_PASSWORD") {
        builder = builder.set_override("elasticsearch.password", password)?;
    }
    if let Ok(pattern) = env::var("INDEX_PATTERN") {
        builder = builder.set_override("search.default_index_pattern", pattern)?;
    }
    if let Ok(user) = env::var("API_USERNAME") {
        builder = builder.set_override("auth.username", user)?;
    }
    if let Ok(password) = env::var("API_PASSWORD") {
        builder = builder.set_override("auth.password", password)?;
    }
    if let Ok(port) = env::var("PORT") {
        builder = builder.set_override("server.port", port)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_auth_credentials() {
        let auth = AuthSettings::default();
        assert_eq!(auth.username, "admin");
        assert_eq!(auth.password, "admin123");
    }

    #[test]
    fn test_default_elasticsearch_settings() {
        let es = ElasticsearchSettings::default();
        assert_eq!(es.host, "http://localhost:9200");
        assert_eq!(es.timeout_secs, 30);
        assert_eq!(es.max_retries, 3);
        assert!(es.retry_on_timeout);
    }

    #[test]
    fn test_default_index_pattern() {
        let search = SearchSettings::default();
        assert_eq!(search.default_index_pattern, "fbus*,smfb*,smfbgermania*");
        assert!(!search.strict_hits);
    }
}
