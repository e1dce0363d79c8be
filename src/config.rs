use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::MissingFieldPolicy;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub proposal: ProposalSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Which data store backs the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Supabase,
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupabaseSettings {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> usize { 3 }
fn default_max_limit() -> usize { 50 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProposalSettings {
    /// `placeholder` renders absent fields as `undefined`, `empty` renders nothing
    #[serde(default)]
    pub missing_fields: MissingFieldPolicy,
}

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
    /// 4. Environment variables (prefixed with COMPASS__)
    /// 5. SUPABASE_URL / SUPABASE_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., COMPASS__SERVER__PORT -> server.port
            .add_source(env_source());

        apply_supabase_env(builder)?.build()?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("COMPASS")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Honour the conventional Supabase variables when they are set
fn apply_supabase_env(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    use std::env;

    if let Ok(url) = env::var("SUPABASE_URL") {
        builder = builder.set_override("supabase.url", url)?;
    }
    if let Ok(key) = env::var("SUPABASE_KEY") {
        builder = builder.set_override("supabase.api_key", key)?;
    }

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matching() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.default_limit, 3);
        assert_eq!(matching.max_limit, 50);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("compass-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 9000

[store]
backend = "memory"

[proposal]
missing_fields = "empty"
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();

        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.store.backend, StoreBackend::Memory);
        assert_eq!(settings.proposal.missing_fields, MissingFieldPolicy::Empty);
        assert_eq!(settings.matching.default_limit, 3);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
