//! HTTP/1.1 server: accept loop, body limits, CORS and request logging.

use super::response::{self, HttpResponse};
use super::AppState;
use crate::config::{ServerConfig, StudioConfig};
use crate::db::{MemoryDatabase, ModelTable};
use crate::error::StudioError;
use crate::store::ModelStore;
use anyhow::{Context, Result};
use bytes::Bytes;
use http::{HeaderValue, Method, Request};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Incoming;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Mongo Studio API server.
///
/// ```no_run
/// use studio_core::config::StudioConfig;
/// use studio_core::http::StudioServer;
///
/// # async fn run() -> anyhow::Result<()> {
/// StudioServer::new(StudioConfig::load()?).serve().await
/// # }
/// ```
pub struct StudioServer {
    config: StudioConfig,
    state: Arc<AppState>,
}

impl StudioServer {
    /// Server with an in-memory model table.
    pub fn new(config: StudioConfig) -> Self {
        Self::with_database(config, Arc::new(MemoryDatabase::new()))
    }

    pub fn with_database(config: StudioConfig, database: Arc<dyn ModelTable>) -> Self {
        let store = ModelStore::new(config.storage.models_dir());
        let state = Arc::new(AppState::new(store, database, config.server.max_body_size));
        Self { config, state }
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Bind `host:port` from the configuration and serve until the task is dropped.
    pub async fn serve(self) -> Result<()> {
        self.config.validate()?;

        let addr = self.config.server.bind_address();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind to {}", addr))?;

        self.serve_on(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve_on(self, listener: TcpListener) -> Result<()> {
        let addr = listener.local_addr().context("Listener has no local address")?;

        log::info!("Starting Mongo Studio server");
        log::info!("   Models path: {}", self.state.store.root().display());
        log::info!(
            "   CORS: {}",
            if self.config.server.cors_enabled {
                self.config.server.cors_origins.join(", ")
            } else {
                "disabled".to_string()
            }
        );
        log::info!("Server listening on http://{}", addr);

        let server = Arc::new(self.config.server);
        let state = self.state;

        loop {
            let (stream, remote_addr) = listener.accept().await?;
            let server = server.clone();
            let state = state.clone();

            tokio::spawn(async move {
                let io = hyper_util::rt::TokioIo::new(stream);

                let service = hyper::service::service_fn(move |req| {
                    let server = server.clone();
                    let state = state.clone();
                    async move { Ok::<_, Infallible>(handle_request(&server, &state, req).await) }
                });

                if let Err(err) =
                    hyper::server::conn::http1::Builder::new().serve_connection(io, service).await
                {
                    log::error!("Connection error from {}: {}", remote_addr, err);
                }
            });
        }
    }
}

async fn handle_request(
    server: &ServerConfig,
    state: &AppState,
    req: Request<Incoming>,
) -> HttpResponse {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    let origin = req.headers().get(http::header::ORIGIN).cloned();

    let mut resp = match read_body(req, server.max_body_size).await {
        Ok(body) => state.route(&method, &path, query.as_deref(), &body).await,
        Err(err) => response::error(&err),
    };

    if server.cors_enabled {
        apply_cors(server, origin.as_ref(), &method, &mut resp);
    }

    let status = resp.status();
    let elapsed = started.elapsed().as_millis();
    if status.is_server_error() {
        log::error!("{} {} -> {} ({}ms)", method, path, status.as_u16(), elapsed);
    } else {
        log::info!("{} {} -> {} ({}ms)", method, path, status.as_u16(), elapsed);
    }
    resp
}

async fn read_body(req: Request<Incoming>, limit: usize) -> Result<Bytes, StudioError> {
    match Limited::new(req.into_body(), limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(StudioError::PayloadTooLarge(limit))
        }
        Err(e) => Err(StudioError::BadRequest(format!("Failed to read request body: {}", e))),
    }
}

fn apply_cors(
    server: &ServerConfig,
    origin: Option<&HeaderValue>,
    method: &Method,
    resp: &mut HttpResponse,
) {
    let Some(origin) = origin else { return };
    let allowed = origin.to_str().map(|o| server.allows_origin(o)).unwrap_or(false);
    if !allowed {
        return;
    }

    let headers = resp.headers_mut();
    headers.insert(http::header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
    headers.insert(
        http::header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(http::header::VARY, HeaderValue::from_static("Origin"));
    if *method == Method::OPTIONS {
        headers.insert(
            http::header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            http::header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
    }
}
