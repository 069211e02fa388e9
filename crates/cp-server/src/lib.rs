//! Web server module
//!
//! Serves the form page and the prediction API using axum.

pub mod middleware;
pub mod routes;
pub mod state;
pub mod types;

use std::net::SocketAddr;

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

pub use state::AppState;

/// Web server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8700,
            enable_cors: true,
        }
    }
}

impl From<cp_config::ServerConfig> for ServerConfig {
    fn from(cfg: cp_config::ServerConfig) -> Self {
        Self {
            host: cfg.host,
            port: cfg.port,
            enable_cors: cfg.enable_cors,
        }
    }
}

/// Start the web server
///
/// Endpoints:
/// - GET  /            (form page)
/// - GET  /v1/options  (valid dropdown choices for the current cascade)
/// - POST /v1/predict  (price estimate)
/// - GET  /v1/health   (status snapshot)
///
/// Returns the serve task handle and the actual port used.
pub async fn start_server(
    config: ServerConfig,
    state: AppState,
) -> anyhow::Result<(tokio::task::JoinHandle<()>, u16)> {
    info!("Starting web server on {}:{}", config.host, config.port);

    let app = build_app(state, config.enable_cors);

    // Try to bind to the configured port, incrementing if necessary
    let host_ip = config.host.parse::<std::net::IpAddr>()?;
    let mut port = config.port;
    let max_attempts = 100;

    let listener = loop {
        let addr = SocketAddr::from((host_ip, port));

        match TcpListener::bind(addr).await {
            Ok(listener) => {
                if port != config.port {
                    info!("Port {} was taken, using port {} instead", config.port, port);
                }
                break listener;
            }
            Err(e) => {
                if port - config.port >= max_attempts {
                    return Err(anyhow::anyhow!(
                        "Could not bind to any port between {} and {} (last error: {})",
                        config.port,
                        port,
                        e
                    ));
                }
                tracing::debug!("Port {} is taken, trying next port", port);
                port += 1;
            }
        }
    };

    info!("Web server listening on http://{}:{}", config.host, port);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {}", e);
        }
    });

    Ok((handle, port))
}

/// Build the axum app with all routes and middleware
pub fn build_app(state: AppState, enable_cors: bool) -> Router {
    let mut router = Router::new()
        .route("/", get(routes::form_page))
        .route("/v1/options", get(routes::get_options))
        .route("/v1/predict", post(routes::predict))
        .route("/v1/health", get(routes::health))
        .with_state(state);

    router = router.layer(axum::middleware::from_fn(logging_middleware));

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router = router.layer(cors);
    }

    router
}

/// Logging middleware to log all requests
async fn logging_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = std::time::Instant::now();

    let response = next.run(req).await;

    let elapsed = start.elapsed();
    let status = response.status();

    if status.is_success() {
        info!("{} {} - {} ({:?})", method, uri, status, elapsed);
    } else {
        error!("{} {} - {} ({:?})", method, uri, status, elapsed);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8700);
        assert!(config.enable_cors);
    }
}
