//! Read-only JSON API over a statline store.
//!
//! Exposes an axum [`Router`] backed by any [`statline_core::store::StatStore`].
//! The loader is the only writer; nothing here mutates the store.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", statline_api::api_router(store.clone()))
//! ```

pub mod cors;
pub mod error;
pub mod seasons;
pub mod subjects;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use serde::Deserialize;
use statline_core::store::StatStore;
use tower_http::trace::TraceLayer;

pub use cors::{DEFAULT_ALLOWED_ORIGINS, cors_layer};
pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Server configuration, deserialised from `statline.toml` and `STATLINE_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  pub store_path:      PathBuf,
  /// Comma-separated list of origins allowed to call the API from a browser.
  pub allowed_origins: String,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `store`, without a path prefix or middleware.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: StatStore + 'static,
{
  Router::new()
    .route("/subjects", get(subjects::list::<S>))
    .route("/subjects/{id}", get(subjects::get_one::<S>))
    .route("/subjects/{id}/seasons/{season}", get(subjects::season::<S>))
    .route("/seasons/{season}", get(seasons::handler::<S>))
    .with_state(store)
}

/// The full application: the API nested under `/api`, with CORS and request
/// tracing applied.
pub fn app<S>(store: Arc<S>, allowed_origins: &str) -> Router
where
  S: StatStore + 'static,
{
  Router::new()
    .nest("/api", api_router(store))
    .layer(cors_layer(allowed_origins))
    .layer(TraceLayer::new_for_http())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
