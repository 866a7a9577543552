//! Export handler.

use std::path::PathBuf;

use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Local;
use recast::{ExportFormat, export};
use serde::{Deserialize, Serialize};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Request body for exporting.
#[derive(Deserialize, Default)]
pub struct ExportRequest {
    /// Output format (default csv).
    pub format: Option<ExportFormat>,
    /// Write to this path on the server instead of returning the file.
    pub path: Option<PathBuf>,
}

/// Response after writing an export to disk.
#[derive(Serialize)]
pub struct ExportResponse {
    pub path: String,
    pub format: ExportFormat,
    pub rows: usize,
}

/// POST /api/export
pub async fn export_dataset(
    State(state): State<AppState>,
    Json(req): Json<ExportRequest>,
) -> Result<Response, ApiError> {
    let format = req.format.unwrap_or_default();

    if let Some(path) = req.path {
        let path = if path.is_relative() {
            state.source_path.with_file_name(path)
        } else {
            path
        };
        let dataset = state.session.read().await.dataset().clone();
        let rows = dataset.len();

        let written = path.clone();
        tokio::task::spawn_blocking(move || export::write(&dataset, &written, format))
            .await
            .map_err(|e| ApiError::Internal(format!("Export task failed: {}", e)))??;

        return Ok(Json(ExportResponse {
            path: path.display().to_string(),
            format,
            rows,
        })
        .into_response());
    }

    let bytes = export::to_bytes(state.session.read().await.dataset(), format)?;
    let file_name = export::default_file_name(format, &Local::now());
    Ok((
        [
            (header::CONTENT_TYPE, format.mime_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    )
        .into_response())
}
