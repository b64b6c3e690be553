//! Configuration loading.
//!
//! Precedence, lowest first: built-in defaults, `config/settings.*` in the
//! working directory, the file named by `SCRIPT_CLEAN_CONFIG`, then
//! `SCRIPT_CLEAN__SECTION__KEY` environment variables.

use std::env;
use std::path::PathBuf;

use axum::http::{header::HeaderName, HeaderValue, Method};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3001";
const CONFIG_FILE: &str = "config/settings";
const CONFIG_FILE_ENV: &str = "SCRIPT_CLEAN_CONFIG";
const ENV_PREFIX: &str = "SCRIPT_CLEAN";

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error(transparent)]
    Build(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_listen_addr")]
    pub listen_addr: String,
    #[serde(default)]
    pub cors: CorsConfig,
}

impl ServerConfig {
    fn default_listen_addr() -> String {
        DEFAULT_LISTEN_ADDR.to_string()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            cors: CorsConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    #[serde(default = "CorsConfig::default_enabled")]
    pub enabled: bool,
    #[serde(default = "CorsConfig::default_allow_origins")]
    pub allow_origins: Vec<String>,
    #[serde(default = "CorsConfig::default_allow_methods")]
    pub allow_methods: Vec<String>,
    #[serde(default = "CorsConfig::default_allow_headers")]
    pub allow_headers: Vec<String>,
    #[serde(default = "CorsConfig::default_max_age_secs")]
    pub max_age_secs: u64,
}

impl CorsConfig {
    fn default_enabled() -> bool {
        true
    }

    fn default_allow_origins() -> Vec<String> {
        vec!["*".to_string()]
    }

    fn default_allow_methods() -> Vec<String> {
        vec!["GET".to_string(), "POST".to_string(), "OPTIONS".to_string()]
    }

    fn default_allow_headers() -> Vec<String> {
        vec!["content-type".to_string()]
    }

    fn default_max_age_secs() -> u64 {
        600
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allow_origins.iter().any(|origin| origin.trim() == "*")
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            allow_origins: Self::default_allow_origins(),
            allow_methods: Self::default_allow_methods(),
            allow_headers: Self::default_allow_headers(),
            max_age_secs: Self::default_max_age_secs(),
        }
    }
}

pub fn load() -> Result<AppConfig, AppConfigError> {
    let mut builder = Config::builder()
        .set_default("server.listen_addr", DEFAULT_LISTEN_ADDR)?
        .add_source(File::with_name(CONFIG_FILE).required(false));

    if let Some(path) = env::var_os(CONFIG_FILE_ENV) {
        builder = builder.add_source(File::from(PathBuf::from(path)).required(true));
    }

    let cfg = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.cors.allow_origins")
                .with_list_parse_key("server.cors.allow_methods")
                .with_list_parse_key("server.cors.allow_headers")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;
    Ok(cfg)
}

pub fn parse_method(method: &str) -> Result<Method, String> {
    Method::from_bytes(method.trim().as_bytes())
        .map_err(|_| format!("invalid HTTP method `{method}` in CORS allow_methods"))
}

pub fn parse_header(name: &str) -> Result<HeaderName, String> {
    HeaderName::from_bytes(name.trim().as_bytes())
        .map_err(|_| format!("invalid HTTP header `{name}` in CORS allow_headers"))
}

pub fn parse_origin(origin: &str) -> Result<HeaderValue, String> {
    HeaderValue::from_str(origin.trim())
        .map_err(|_| format!("invalid origin `{origin}` in CORS allow_origins"))
}
