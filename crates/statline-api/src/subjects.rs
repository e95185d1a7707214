//! Handlers for `/subjects` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/subjects` | All subjects, sorted by id |
//! | `GET`  | `/subjects/:id` | 404 if not found |
//! | `GET`  | `/subjects/:id/seasons/:season` | Latest stat row for that season |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use statline_core::{
  stat::SubjectSeasonStat,
  store::StatStore,
  subject::{Subject, SubjectId},
};

use crate::error::ApiError;

fn parse_id(raw: String) -> Result<SubjectId, ApiError> {
  SubjectId::new(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /subjects`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Subject>>, ApiError>
where
  S: StatStore,
{
  let subjects = store.list_subjects().await.map_err(ApiError::store)?;
  Ok(Json(subjects))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /subjects/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Subject>, ApiError>
where
  S: StatStore,
{
  let id = parse_id(id)?;
  let subject = store
    .get_subject(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("subject {id} not found")))?;
  Ok(Json(subject))
}

// ─── One season ───────────────────────────────────────────────────────────────

/// `GET /subjects/:id/seasons/:season`
///
/// Reruns of the loader leave several rows per season; the most recently
/// inserted one is returned.
pub async fn season<S>(
  State(store): State<Arc<S>>,
  Path((id, season)): Path<(String, i32)>,
) -> Result<Json<SubjectSeasonStat>, ApiError>
where
  S: StatStore,
{
  let id = parse_id(id)?;
  let latest = store
    .subject_season_stats(&id, season)
    .await
    .map_err(ApiError::store)?
    .pop()
    .ok_or_else(|| ApiError::NotFound(format!("no stats found for {id} in season {season}")))?;
  Ok(Json(latest))
}
