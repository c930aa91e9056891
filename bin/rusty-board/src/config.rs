//! Runtime settings, layered: built-in defaults, then an optional
//! `rusty-board.toml`, then `RB__SECTION__KEY` environment variables.
//! A bare `PORT` variable wins over everything for the listen port.

use std::path::PathBuf;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use rb_api::{ApiConfig, IdFields};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub api: ApiSettings,
    /// Directory holding `views/` and `public/`.
    #[serde(default = "default_static_root")]
    pub static_root: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub request_timeout_secs: u64,
    /// Accepted names for the thread id of a thread report, highest priority first.
    pub report_id_fields: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite:messageboard.db".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            report_id_fields: vec!["thread_id".to_string(), "report_id".to_string()],
        }
    }
}

fn default_static_root() -> PathBuf {
    PathBuf::from(".")
}

impl ApiSettings {
    pub fn to_api_config(&self) -> ApiConfig {
        ApiConfig {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            report_id_fields: IdFields::new(self.report_id_fields.iter().cloned()),
        }
    }
}

pub fn load() -> Result<Settings, ConfigError> {
    let mut builder = Config::builder()
        .add_source(File::with_name("rusty-board").required(false))
        .add_source(
            Environment::with_prefix("RB")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("api.report_id_fields")
                .try_parsing(true),
        );
    if let Ok(port) = std::env::var("PORT") {
        builder = builder.set_override("server.port", port)?;
    }
    build(builder)
}

fn build(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    builder.build()?.try_deserialize()
}
