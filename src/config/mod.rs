//! Configuration module for the shipping relay

use serde::Deserialize;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use std::fmt;
use std::path::PathBuf;

/// Environment variable carrying the Shippo credential
pub const SHIPPO_TOKEN_ENV: &str = "SHIPPO_API_TOKEN";

/// Main application settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub shippo: ShippoSettings,
    #[serde(default)]
    pub assets: AssetSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Shippo provider configuration
#[derive(Clone, Deserialize)]
pub struct ShippoSettings {
    /// Secret token; only ever attached to outbound provider calls
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_shippo_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl fmt::Debug for ShippoSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShippoSettings")
            .field("api_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Hosts carrier logos may be loaded from
#[derive(Debug, Clone, Deserialize)]
pub struct AssetSettings {
    #[serde(default = "default_image_hosts")]
    pub image_hosts: Vec<String>,
}

impl Default for AssetSettings {
    fn default() -> Self {
        AssetSettings {
            image_hosts: default_image_hosts(),
        }
    }
}

fn default_shippo_base_url() -> String {
    "https://api.goshippo.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_image_hosts() -> Vec<String> {
    vec!["shippo-static.s3.amazonaws.com".to_string()]
}

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration priority (highest to lowest):
    /// 1. `SHIPPO_API_TOKEN`
    /// 2. Environment variables (prefixed with RELAY_)
    /// 3. config/local.toml (gitignored)
    /// 4. config/default.toml
    /// 5. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let builder = layered()?
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("shippo.base_url", defaults.shippo.base_url)?
            .set_default("shippo.timeout_secs", defaults.shippo.timeout_secs as i64)?
            .set_override_option("shippo.api_token", std::env::var(SHIPPO_TOKEN_ENV).ok())?;

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the relay cannot operate with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shippo.api_token.trim().is_empty() {
            return Err(ConfigError::Message(format!("{} cannot be empty", SHIPPO_TOKEN_ENV)));
        }
        if url::Url::parse(&self.shippo.base_url).is_err() {
            return Err(ConfigError::Message(format!(
                "shippo.base_url is not a valid URL: {}",
                self.shippo.base_url
            )));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl AssetSettings {
    /// Read only the `[assets]` section, from the same sources as `Settings::load`
    ///
    /// Front-ends use this; they have no provider credential to validate.
    pub fn load() -> Result<Self, ConfigError> {
        #[derive(Deserialize)]
        struct AssetsOnly {
            #[serde(default)]
            assets: AssetSettings,
        }

        let only: AssetsOnly = layered()?.build()?.try_deserialize()?;
        Ok(only.assets)
    }
}

/// Config files and `RELAY_*` environment, lowest priority first
fn layered() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let config_dir = std::env::var("CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    Ok(Config::builder()
        .add_source(File::from(config_dir.join("default.toml")).required(false))
        .add_source(File::from(config_dir.join("local.toml")).required(false))
        // RELAY_SERVER__PORT, RELAY_SHIPPO__BASE_URL, etc.
        .add_source(
            Environment::with_prefix("RELAY")
                .separator("__")
                .try_parsing(true)
        ))
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 8080,
                workers: None,
            },
            shippo: ShippoSettings {
                api_token: String::new(),
                base_url: default_shippo_base_url(),
                timeout_secs: default_timeout_secs(),
            },
            assets: AssetSettings::default(),
        }
    }
}
