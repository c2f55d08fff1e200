//! HTTP Server

use std::{
    net::{Ipv4Addr, SocketAddr, TcpListener},
    path::PathBuf,
    time::Duration,
};

use anyhow::Context;
use axum::{
    extract::Request,
    routing::{get, post},
    Json, Router,
};
use axum_server::Handle;
use clap::Parser;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::debug;
use utoipa::OpenApi;

use crate::domain::mail::{mailer::Mailer, template::TemplateStore};

pub mod auth;
pub mod errors;
pub mod handlers;
pub mod open_api;
pub mod state;

use open_api::ApiDocs;
use state::{AppConfig, AppState, Environment};

/// Configuration for the HTTP server.
#[derive(Debug, Clone, Parser)]
pub struct HttpServerConfig {
    /// The port to listen on
    #[arg(short, long, env = "HTTP_PORT", default_value = "3000")]
    pub port: u16,

    /// The deployment environment
    #[arg(long, env = "ENVIRONMENT", value_enum, default_value = "production")]
    pub environment: Environment,

    /// The query parameter, header and cookie name carrying the API key
    #[arg(long, env = "API_KEY_NAME", default_value = "access_token")]
    pub api_key_name: String,

    /// The pre-shared API key
    #[arg(long, env = "API_KEY")]
    pub api_key: String,

    /// The directory message templates are read from
    #[arg(long, env = "TEMPLATES_DIR", default_value = "templates")]
    pub templates_dir: PathBuf,
}

/// The application's HTTP server
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    /// Returns a new HTTP server bound to the port specified in `config`.
    pub async fn new(
        mailer: impl Mailer,
        templates: impl TemplateStore,
        config: HttpServerConfig,
    ) -> anyhow::Result<Self> {
        let app_config = AppConfig {
            environment: config.environment,
            api_key_name: config.api_key_name,
            api_key: config.api_key,
        };

        let router = router(AppState::new(app_config, mailer, templates));

        let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
        let listener = TcpListener::bind(address)
            .with_context(|| format!("failed to listen on {}", config.port))?;

        Ok(Self { router, listener })
    }

    /// Runs the HTTP server.
    #[mutants::skip]
    pub async fn run(self) -> anyhow::Result<()> {
        debug!("listening on {}", self.listener.local_addr()?);

        let handle = Handle::new();

        tokio::spawn(shutdown_signal(handle.clone()));

        axum_server::from_tcp(self.listener)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        Ok(())
    }
}

/// Create the application's router
pub fn router<M: Mailer, T: TemplateStore>(state: AppState<M, T>) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        let uri = request.uri().to_string();
        tracing::info_span!("http_request", method = ?request.method(), uri)
    });

    let mut router = Router::new()
        .route("/ping", get(handlers::ping::handler))
        .route("/send_email", post(handlers::send_email::handler::<M, T>));

    // The interactive documentation is a development-only surface.
    if state.config.environment == Environment::Development {
        router = router
            .route("/docs", get(handlers::docs::handler))
            .route("/openapi.json", get(Json(ApiDocs::openapi())));
    }

    router.layer(trace_layer).with_state(state)
}

#[mutants::skip]
async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    debug!("shutting down gracefully");
    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}
