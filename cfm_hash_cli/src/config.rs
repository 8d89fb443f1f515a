use crate::paths;
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment prefix for CLI settings. Nested keys use `__`, as in
/// `CFMHASH_DIGEST__ALGORITHM`.
pub const ENV_PREFIX: &str = "CFMHASH_";

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub digest: DigestConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DigestConfig {
    /// Algorithm used when `--algorithm` is not given
    pub algorithm: String,
    /// Bytes read per `cfmp_hash_update` call
    pub chunk_size: usize,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub default_format: String,
    pub color_enabled: bool,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            algorithm: "SHA-256".to_string(),
            chunk_size: 64 * 1024,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            color_enabled: true,
        }
    }
}

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with default XDG-compliant paths
    pub fn new() -> Self {
        Self {
            config_path: paths::get_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// Layered figment: defaults, then the config file, then environment
    pub fn figment(&self) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load configuration with layered priority: ENV > File > Defaults.
    /// Command-line flags are applied on top by the caller.
    pub fn load(&self) -> Result<AppConfig> {
        let config: AppConfig = self
            .figment()
            .extract()
            .context("Failed to load configuration")?;
        if config.digest.chunk_size == 0 {
            anyhow::bail!("digest.chunk_size must be greater than 0");
        }
        Ok(config)
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        let value = toml::Value::try_from(self.load()?)?;

        let mut current = &value;
        for part in key.split('.') {
            match current {
                toml::Value::Table(table) => {
                    current = table
                        .get(part)
                        .ok_or_else(|| anyhow::anyhow!("Key '{}' not found", key))?;
                }
                _ => anyhow::bail!("Invalid key path: {}", key),
            }
        }

        match current {
            toml::Value::String(s) => Ok(s.clone()),
            toml::Value::Integer(i) => Ok(i.to_string()),
            toml::Value::Boolean(b) => Ok(b.to_string()),
            _ => anyhow::bail!("Value at '{}' is not a simple type", key),
        }
    }

    /// Set a configuration value by key (dot notation)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parsed = Self::parse_config_value(key, value)?;
        let Some((section, field)) = key.split_once('.') else {
            anyhow::bail!("Key '{}' must have the form section.field", key);
        };

        let mut config = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            toml::from_str(&content)?
        } else {
            toml::Table::new()
        };

        let table = config
            .entry(section.to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        match table {
            toml::Value::Table(table) => {
                table.insert(field.to_string(), parsed);
            }
            _ => anyhow::bail!("Invalid key path: expected table at '{}'", section),
        }

        // Ensure directory exists
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.config_path, toml::to_string_pretty(&config)?)?;
        Ok(())
    }

    /// List all configuration values, sorted by key
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let value = toml::Value::try_from(self.load()?)?;

        let mut items = Vec::new();
        Self::collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }

    /// Recursively collect all key-value pairs from TOML
    fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
        match value {
            toml::Value::Table(table) => {
                for (key, val) in table {
                    let new_prefix = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    Self::collect_values(val, new_prefix, items);
                }
            }
            toml::Value::String(s) => items.push((prefix, s.clone())),
            toml::Value::Integer(i) => items.push((prefix, i.to_string())),
            toml::Value::Boolean(b) => items.push((prefix, b.to_string())),
            _ => {}
        }
    }

    /// Validate and type a value for a known key
    fn parse_config_value(key: &str, value: &str) -> Result<toml::Value> {
        match key {
            "digest.algorithm" => {
                if value.is_empty() {
                    anyhow::bail!("algorithm must not be empty");
                }
                Ok(toml::Value::String(value.to_string()))
            }
            "digest.chunk_size" => {
                let size: i64 = value
                    .parse()
                    .context("chunk_size must be a positive integer")?;
                if size <= 0 {
                    anyhow::bail!("chunk_size must be greater than 0");
                }
                Ok(toml::Value::Integer(size))
            }
            "output.default_format" => match value {
                "text" | "json" => Ok(toml::Value::String(value.to_string())),
                _ => anyhow::bail!("default_format must be 'text' or 'json'"),
            },
            "output.color_enabled" => {
                let enabled: bool = value.parse().context("Value must be 'true' or 'false'")?;
                Ok(toml::Value::Boolean(enabled))
            }
            _ => anyhow::bail!("Unknown configuration key: {}", key),
        }
    }
}

/// Load the configuration using the default manager
pub fn get_config() -> Result<AppConfig> {
    ConfigManager::new().load()
}
