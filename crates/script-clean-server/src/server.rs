//! HTTP routes and server lifecycle.

use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    http::{HeaderValue, Method},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use script_clean::{shape, ShapedPayload};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::{net::TcpListener, sync::Notify};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{parse_header, parse_method, parse_origin, AppConfig, CorsConfig, ServerConfig};

const ROOT_PATH: &str = "/";
const HEALTH_PATH: &str = "/api/health";
const CLEAN_PATH: &str = "/clean-script";
const ROOT_STATUS: &str = "ok";
const HEALTH_STATUS: &str = "healthy";
const HEALTH_MESSAGE: &str = "script-clean API is running";
pub const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize, Copy, Clone, PartialEq, Eq)]
struct StatusResponse {
    status: &'static str,
}

#[derive(Debug, Serialize, Copy, Clone, PartialEq, Eq)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
}

#[derive(Debug, Deserialize)]
struct CleanRequest {
    payload: Value,
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("listen address may not be empty")]
    EmptyListenAddr,
    #[error("invalid listen address `{address}`: {source}")]
    InvalidListenAddr {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid CORS configuration: {message}")]
    InvalidCors { message: String },
    #[error("failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to determine local address: {source}")]
    LocalAddr {
        #[source]
        source: std::io::Error,
    },
    #[error("axum server error: {source}")]
    Serve {
        #[source]
        source: std::io::Error,
    },
}

/// Routes without middleware.
pub fn build_api_router() -> Router {
    Router::new()
        .route(ROOT_PATH, get(root))
        .route(HEALTH_PATH, get(health))
        .route(CLEAN_PATH, post(clean_script))
}

/// Routes with request tracing and, when enabled, CORS.
pub fn build_router(config: &ServerConfig) -> Result<Router, ServerError> {
    let mut router = build_api_router();
    if let Some(cors) = cors_layer(&config.cors)? {
        router = router.layer(cors);
    }
    Ok(router.layer(TraceLayer::new_for_http()))
}

/// Bind the configured address and serve until Ctrl+C or SIGTERM.
pub async fn serve(config: AppConfig) -> Result<(), ServerError> {
    let listen_addr = parse_listen_addr(&config.server.listen_addr)?;
    let listener = bind_listener(listen_addr).await?;
    serve_on(listener, &config.server, wait_for_shutdown()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// In-flight requests get [`DRAIN_TIMEOUT`] to finish once the signal fires.
pub async fn serve_on<F>(
    listener: TcpListener,
    config: &ServerConfig,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(config)?;
    let local_addr = listener
        .local_addr()
        .map_err(|source| ServerError::LocalAddr { source })?;
    tracing::info!(%local_addr, "script-clean server listening");

    let signalled = Arc::new(Notify::new());
    let notify = Arc::clone(&signalled);
    let graceful = async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("shutdown signal received; draining connections");
                notify.notify_one();
            })
            .await
    };
    let drain_deadline = async move {
        signalled.notified().await;
        tokio::time::sleep(DRAIN_TIMEOUT).await;
    };

    tokio::select! {
        result = graceful => result.map_err(|source| ServerError::Serve { source })?,
        () = drain_deadline => {
            tracing::warn!(seconds = DRAIN_TIMEOUT.as_secs(), "drain timed out; dropping connections");
        }
    }

    tracing::info!(%local_addr, "server stopped");
    Ok(())
}

async fn root() -> impl IntoResponse {
    Json(StatusResponse {
        status: ROOT_STATUS,
    })
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: HEALTH_STATUS,
        message: HEALTH_MESSAGE,
    })
}

// Rejected payload types are still a 200; the body carries `success: false`.
async fn clean_script(Json(request): Json<CleanRequest>) -> Json<ShapedPayload> {
    let shaped = shape(&request.payload);
    if let ShapedPayload::Invalid(invalid) = &shaped {
        tracing::debug!(error = %invalid.error, "payload rejected by shaper");
    }
    Json(shaped)
}

fn cors_layer(config: &CorsConfig) -> Result<Option<CorsLayer>, ServerError> {
    if !config.enabled {
        return Ok(None);
    }

    let invalid = |message: String| ServerError::InvalidCors { message };

    let origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins = config
            .allow_origins
            .iter()
            .map(|origin| parse_origin(origin))
            .collect::<Result<Vec<HeaderValue>, _>>()
            .map_err(invalid)?;
        AllowOrigin::list(origins)
    };
    let methods = config
        .allow_methods
        .iter()
        .map(|method| parse_method(method))
        .collect::<Result<Vec<Method>, _>>()
        .map_err(invalid)?;
    let headers = config
        .allow_headers
        .iter()
        .map(|header| parse_header(header))
        .collect::<Result<Vec<_>, _>>()
        .map_err(invalid)?;

    Ok(Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers)
            .max_age(Duration::from_secs(config.max_age_secs)),
    ))
}

async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(%error, "failed to capture Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to capture SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::debug!("Ctrl+C received"),
        () = sigterm => tracing::debug!("SIGTERM received"),
    }
}

fn parse_listen_addr(addr: &str) -> Result<SocketAddr, ServerError> {
    let trimmed = addr.trim();
    if trimmed.is_empty() {
        return Err(ServerError::EmptyListenAddr);
    }

    trimmed
        .parse()
        .map_err(|source| ServerError::InvalidListenAddr {
            address: trimmed.to_string(),
            source,
        })
}

async fn bind_listener(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            address: addr.to_string(),
            source,
        })
}
