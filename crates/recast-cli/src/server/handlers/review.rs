//! Generation, candidate and edit handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use recast::{EditBuffer, SlotFailure};
use serde::Serialize;
use tracing::debug;

use super::session::SessionView;
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Response after a generation batch.
#[derive(Serialize)]
pub struct GenerateResponse {
    pub session: SessionView,
    /// Calls that failed without sinking the batch.
    pub failures: Vec<SlotFailure>,
}

/// POST /api/generate
///
/// The batch runs on the blocking pool without holding the session lock.
/// Its result is dropped if the reviewer moved on in the meantime.
pub async fn generate(State(state): State<AppState>) -> Result<Json<GenerateResponse>, ApiError> {
    let Some(generator) = state.generator.clone() else {
        return Err(ApiError::BadRequest(
            "Generation is disabled: no LLM provider configured".to_string(),
        ));
    };

    let (index, row) = state.session.read().await.generation_request()?;
    debug!(row = index, "starting generation");

    let outcome = tokio::task::spawn_blocking(move || generator.generate(index, &row))
        .await
        .map_err(|e| ApiError::Internal(format!("Generation task failed: {}", e)))??;

    let mut session = state.session.write().await;
    session.apply_generation(&outcome)?;

    Ok(Json(GenerateResponse {
        session: SessionView::new(&session, state.llm_provider_name.clone()),
        failures: outcome.failures,
    }))
}

fn candidate_index(k: usize) -> Result<usize, ApiError> {
    k.checked_sub(1)
        .ok_or_else(|| ApiError::NotFound("Candidates are numbered from 1".to_string()))
}

/// POST /api/candidates/:k/use
pub async fn use_candidate(
    State(state): State<AppState>,
    Path(k): Path<usize>,
) -> Result<Json<SessionView>, ApiError> {
    let mut session = state.session.write().await;
    session.use_candidate(candidate_index(k)?)?;
    Ok(Json(SessionView::new(&session, state.llm_provider_name.clone())))
}

/// POST /api/candidates/:k/edit
pub async fn edit_candidate(
    State(state): State<AppState>,
    Path(k): Path<usize>,
) -> Result<Json<SessionView>, ApiError> {
    let mut session = state.session.write().await;
    session.begin_edit(candidate_index(k)?)?;
    Ok(Json(SessionView::new(&session, state.llm_provider_name.clone())))
}

/// PUT /api/edit
pub async fn update_edit(
    State(state): State<AppState>,
    Json(buffer): Json<EditBuffer>,
) -> Result<Json<SessionView>, ApiError> {
    let mut session = state.session.write().await;
    session.update_edit(buffer)?;
    Ok(Json(SessionView::new(&session, state.llm_provider_name.clone())))
}

/// POST /api/edit/save
pub async fn save_edit(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
    let mut session = state.session.write().await;
    session.save_edit()?;
    Ok(Json(SessionView::new(&session, state.llm_provider_name.clone())))
}

/// POST /api/edit/cancel
pub async fn cancel_edit(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
    let mut session = state.session.write().await;
    session.cancel_edit()?;
    Ok(Json(SessionView::new(&session, state.llm_provider_name.clone())))
}
