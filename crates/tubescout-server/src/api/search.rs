use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tubescout_core::{export::reports_to_csv, RunSnapshot};

use super::{ApiError, AppState};
use crate::worker::spawn_run;

#[derive(Debug, Deserialize)]
pub(super) struct SearchRequest {
    query: String,
    max_channels: Option<usize>,
    #[serde(default)]
    skip_analysis: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct SearchAccepted {
    task_id: Uuid,
}

/// `POST /api/search` — registers a run and returns its id immediately;
/// the work happens on a dedicated worker task.
pub(super) async fn start_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<(StatusCode, Json<SearchAccepted>), ApiError> {
    let query = request.query.trim().to_owned();
    if query.is_empty() {
        return Err(ApiError::new("bad_request", "query is required"));
    }
    let max_channels = request
        .max_channels
        .unwrap_or(state.default_max_channels)
        .max(1);

    let task_id = state.runs.create().await;
    spawn_run(
        state.runs.clone(),
        Arc::clone(&state.deps),
        task_id,
        query,
        max_channels,
        request.skip_analysis,
    );

    Ok((StatusCode::ACCEPTED, Json(SearchAccepted { task_id })))
}

/// `GET /api/status/{task_id}` — current `{status, message, results}`.
pub(super) async fn get_status(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<RunSnapshot>, ApiError> {
    state
        .runs
        .get(task_id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::new("not_found", "task not found"))
}

/// `GET /api/export/{task_id}/csv` — results as a CSV attachment.
pub(super) async fn export_csv(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let snapshot = state
        .runs
        .get(task_id)
        .await
        .ok_or_else(|| ApiError::new("not_found", "task not found"))?;
    if snapshot.results.is_empty() {
        return Err(ApiError::new("not_found", "no results for task"));
    }

    let csv = reports_to_csv(&snapshot.results);
    let short_id: String = task_id.to_string().chars().take(8).collect();
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"results_{short_id}.csv\""),
        ),
    ];
    Ok((headers, csv).into_response())
}
