//! Cross-origin policy for browser front ends.

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Origins allowed when none are configured: the local dev server and the
/// usual localhost aliases.
pub const DEFAULT_ALLOWED_ORIGINS: &str =
  "http://localhost:5173,http://localhost,http://127.0.0.1,http://localhost:80";

/// Build a read-only CORS layer from a comma-separated origin list.
///
/// Blank entries are ignored; entries that are not valid header values are
/// logged and skipped.
pub fn cors_layer(allowed_origins: &str) -> CorsLayer {
  let origins: Vec<HeaderValue> = allowed_origins
    .split(',')
    .map(str::trim)
    .filter(|o| !o.is_empty())
    .filter_map(|o| match HeaderValue::from_str(o) {
      Ok(value) => Some(value),
      Err(_) => {
        tracing::warn!(origin = o, "ignoring invalid CORS origin");
        None
      }
    })
    .collect();

  CorsLayer::new()
    .allow_methods([Method::GET])
    .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
    .allow_origin(AllowOrigin::list(origins))
    .max_age(Duration::from_secs(3600))
}
