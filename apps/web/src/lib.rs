//! sqirvy HTTP server.
//!
//! `GET /models` lists the model registry and `POST /query` runs a single
//! query. Credentials are read per request, so a server can start without
//! any provider configured.

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State, rejection::JsonRejection},
    http::{Method, header},
    routing::{get, post},
};
pub use error::ApiError;
use model::{Client, ClientConfig, Context, ModelEntry, Options};
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};

mod error;

/// System line placed before every web query.
pub const WEB_SYSTEM: &str = "you are an experienced web developer";

/// Temperature used when a request omits it.
pub const DEFAULT_TEMPERATURE: f32 = 50.0;

/// Looks up a credential or endpoint variable by name.
pub type Lookup = Arc<dyn Fn(&'static str) -> Option<String> + Send + Sync>;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    lookup: Lookup,
    timeout: Option<Duration>,
}

impl AppState {
    /// State reading credentials from the process environment.
    pub fn from_env(timeout: Option<Duration>) -> Self {
        Self::new(Arc::new(|var: &'static str| std::env::var(var).ok()), timeout)
    }

    /// State reading credentials through `lookup`.
    pub fn new(lookup: Lookup, timeout: Option<Duration>) -> Self {
        Self { lookup, timeout }
    }
}

/// `GET /models` response body.
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    /// Registered models sorted by name.
    pub models: &'static [ModelEntry],
}

/// `POST /query` request body.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Model name from the registry.
    pub model: String,
    /// User prompt.
    pub prompt: String,
    /// Temperature, 0 to 100.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

/// `POST /query` response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The model's answer.
    pub result: String,
}

/// Build the router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/models", get(models))
        .route("/query", post(query))
        .layer(DefaultBodyLimit::max(2 * prompt::MAX_INPUT_BYTES))
        .layer(cors)
        .with_state(state)
}

async fn models() -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: model::models(),
    })
}

async fn query(
    State(state): State<AppState>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Json(req) = body?;
    let provider = model::resolve_provider(&req.model)?;
    if req.prompt.trim().is_empty() {
        return Err(ApiError::bad_request("prompt is required"));
    }
    let prompt = format!("{WEB_SYSTEM}\n\n{}", req.prompt);
    if prompt.len() > prompt::MAX_INPUT_BYTES {
        return Err(ApiError::bad_request(
            prompt::Error::BudgetExceeded {
                limit: prompt::MAX_INPUT_BYTES,
            }
            .to_string(),
        ));
    }

    let lookup = state.lookup.clone();
    let config = ClientConfig::from_lookup(provider, move |var| lookup(var))?;
    let mut client = model::build_client(provider, &config)?;

    let ctx = match state.timeout {
        Some(timeout) => Context::with_timeout(timeout),
        None => Context::background(),
    };
    tracing::info!("query for {} ({provider})", req.model);
    let result = client
        .query_text(
            &ctx,
            &prompt,
            &req.model,
            Options::with_temperature(req.temperature),
        )
        .await;
    client.close();
    Ok(Json(QueryResponse { result: result? }))
}

/// Handle returned by [`serve`]: the bound address and a shutdown trigger.
pub struct ServeHandle {
    /// The address the server is listening on.
    pub addr: std::net::SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    join: Option<tokio::task::JoinHandle<std::io::Result<()>>>,
}

impl ServeHandle {
    /// Trigger graceful shutdown and wait for the server to stop.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(join) = self.join.take() {
            join.await??;
        }
        Ok(())
    }
}

/// Bind `addr` and serve the router on a background task.
pub async fn serve(addr: &str, state: AppState) -> Result<ServeHandle> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;
    tracing::info!("listening on {addr}");

    let app = router(state);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("received shutdown signal");
            })
            .await
    });

    Ok(ServeHandle {
        addr,
        shutdown_tx: Some(shutdown_tx),
        join: Some(join),
    })
}
