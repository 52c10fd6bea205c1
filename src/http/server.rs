//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create the Axum router and application state
//! - Wire up middleware (access-log tracing)
//! - Dispatch requests through the route table
//! - Run the bound command and write its output as the response
//! - Serve the cached index page and the `/exit` route
//!
//! # Design Decisions
//! - A single catch-all handler consults the immutable route table; paths
//!   are not registered with the framework router, so exact-match semantics
//!   stay in one place
//! - No method filtering: any method dispatches a bound path
//! - Command failures come back as a 200 with the error text in the body
//!   (see DESIGN.md for the contract decision)
//! - `/exit` triggers the shutdown channel; the graceful-shutdown drain
//!   flushes the response before the server stops

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::any,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::exec::{execute, EnvironmentBuilder};
use crate::http::request::RequestContext;
use crate::lifecycle::Shutdown;
use crate::routing::{Dispatch, RouteTable};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<RouteTable>,
    pub env: Arc<EnvironmentBuilder>,
    pub config: Arc<ServerConfig>,
    pub shutdown: Arc<Shutdown>,
}

/// HTTP server bridging requests to shell commands.
pub struct HttpServer {
    router: Router,
    shutdown: Arc<Shutdown>,
}

impl HttpServer {
    /// Create a server from a validated configuration and an ambient
    /// environment snapshot (normally `std::env::vars().collect()`).
    pub fn new(config: Arc<ServerConfig>, ambient: Vec<(String, String)>) -> Self {
        let table = Arc::new(RouteTable::from_config(&config));
        let env = Arc::new(EnvironmentBuilder::new(&config, ambient));
        let shutdown = Arc::new(Shutdown::new());

        let state = AppState {
            table,
            env,
            config,
            shutdown: shutdown.clone(),
        };

        let router = Router::new()
            .route("/", any(dispatch_handler))
            .route("/{*path}", any(dispatch_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        Self { router, shutdown }
    }

    /// Handle used to stop the server from outside (tests, signal glue).
    pub fn shutdown_handle(&self) -> Arc<Shutdown> {
        self.shutdown.clone()
    }

    /// Run the server until Ctrl+C or the `/exit` route fires, draining
    /// in-flight responses before returning.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(self.shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: resolve the path and act on the dispatch decision.
async fn dispatch_handler(
    State(state): State<AppState>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path().to_string();
    let method = request.method().clone();

    match state.table.dispatch(&path) {
        Dispatch::Execute(command) => {
            tracing::info!(method = %method, path = %path, "Dispatching command");

            let command = command.to_string();
            let ctx = RequestContext::from_request(request, Some(remote), state.config.form).await;
            let env = state.env.build(&ctx);

            match execute(&command, &env).await {
                Ok(stdout) => String::from_utf8_lossy(&stdout).into_owned().into_response(),
                Err(err) => {
                    tracing::error!(path = %path, error = %err, "Command execution failed");
                    format!("exec error: {err}").into_response()
                }
            }
        }
        Dispatch::Index(html) => {
            tracing::info!("Serving index page");
            Html(html.to_string()).into_response()
        }
        Dispatch::Exit => {
            tracing::info!("Exit requested over HTTP");
            state.shutdown.trigger();
            "Bye...".into_response()
        }
        Dispatch::NotFound => {
            tracing::warn!(method = %method, path = %path, "No route bound");
            (StatusCode::NOT_FOUND, "404 page not found").into_response()
        }
    }
}

/// Resolves when the process should stop accepting connections.
async fn shutdown_signal(shutdown: Arc<Shutdown>) {
    let mut exit = shutdown.subscribe();
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
        _ = exit.recv() => {
            tracing::info!("Exit route triggered shutdown");
        }
    }
}
