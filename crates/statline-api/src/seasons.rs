//! Handler for `GET /seasons/:season`: every stat row of one season, each
//! joined with its subject's display name, in insertion order.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use statline_core::{stat::SubjectSeasonStat, store::StatStore};

use crate::error::ApiError;

pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Path(season): Path<i32>,
) -> Result<Json<Vec<SubjectSeasonStat>>, ApiError>
where
  S: StatStore,
{
  let rows = store.season_stats(season).await.map_err(ApiError::store)?;
  if rows.is_empty() {
    return Err(ApiError::NotFound(format!("no stats found for season {season}")));
  }
  Ok(Json(rows))
}
