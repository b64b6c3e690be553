//! # script-clean-server
//!
//! HTTP boundary for [`script_clean`]: `POST /clean-script` takes
//! `{"payload": <any JSON>}` and answers with the shaped document.

pub mod config;
mod server;

pub use self::config::{AppConfig, AppConfigError, CorsConfig, ServerConfig};
pub use server::{build_api_router, build_router, serve, serve_on, ServerError, DRAIN_TIMEOUT};
