//! Session view and navigation handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use recast::{Candidate, EditBuffer, ReviewSession, ReviewState, Row};
use serde::{Deserialize, Serialize};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// A candidate as shown to the reviewer.
#[derive(Serialize)]
pub struct CandidateView {
    /// 1-based candidate number.
    pub number: usize,
    pub question: String,
    pub options: Vec<String>,
    /// Resolved answer text; empty when the selector matches no option.
    pub answer: String,
    pub answer_selector: String,
    pub explanation: String,
    pub citations: String,
}

impl CandidateView {
    fn new(number: usize, candidate: &Candidate) -> Self {
        Self {
            number,
            question: candidate.question.clone(),
            options: candidate.option_texts().to_vec(),
            answer: candidate.resolve_answer(),
            answer_selector: candidate.answer_selector.clone(),
            explanation: candidate.explanation.clone(),
            citations: candidate.citations.clone(),
        }
    }
}

/// Full view of the review session.
#[derive(Serialize)]
pub struct SessionView {
    pub state: ReviewState,
    /// 1-based row number.
    pub position: usize,
    pub total: usize,
    pub row: Row,
    pub candidates: Vec<CandidateView>,
    pub edit: Option<EditBuffer>,
    pub dirty: bool,
    /// Configured LLM provider, if generation is enabled.
    pub llm: Option<String>,
}

impl SessionView {
    pub fn new(session: &ReviewSession, llm: Option<String>) -> Self {
        let candidates = session
            .candidates()
            .map(|set| {
                set.iter()
                    .enumerate()
                    .map(|(k, c)| CandidateView::new(k + 1, c))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            state: session.state(),
            position: session.current_index() + 1,
            total: session.len(),
            row: session.current_row().clone(),
            candidates,
            edit: session.edit_buffer().cloned(),
            dirty: session.is_dirty(),
            llm,
        }
    }
}

/// GET /api/session
pub async fn get_session(State(state): State<AppState>) -> Json<SessionView> {
    let session = state.session.read().await;
    Json(SessionView::new(&session, state.llm_provider_name.clone()))
}

/// Query parameters for the row listing.
#[derive(Deserialize)]
pub struct RowsQuery {
    pub search: Option<String>,
}

/// One entry of the row listing.
#[derive(Serialize)]
pub struct RowSummary {
    /// 1-based row number.
    pub row: usize,
    pub state: String,
    pub attribute: String,
    pub question: String,
    pub complete: bool,
}

/// Response for the row listing.
#[derive(Serialize)]
pub struct RowsResponse {
    pub total: usize,
    pub rows: Vec<RowSummary>,
}

/// GET /api/rows?search=
pub async fn list_rows(
    State(state): State<AppState>,
    Query(query): Query<RowsQuery>,
) -> Json<RowsResponse> {
    let session = state.session.read().await;
    let dataset = session.dataset();

    let rows = dataset
        .search(query.search.as_deref().unwrap_or(""))
        .into_iter()
        .filter_map(|i| {
            dataset.get(i).map(|row| RowSummary {
                row: i + 1,
                state: row.state.clone(),
                attribute: row.attribute.clone(),
                question: row.question.clone(),
                complete: row.is_complete(),
            })
        })
        .collect();

    Json(RowsResponse {
        total: dataset.len(),
        rows,
    })
}

/// Request body for jumping to a row.
#[derive(Deserialize)]
pub struct NavigateRequest {
    /// 1-based row number.
    pub index: usize,
}

/// POST /api/navigate
pub async fn navigate(
    State(state): State<AppState>,
    Json(req): Json<NavigateRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let mut session = state.session.write().await;

    if req.index == 0 || req.index > session.len() {
        return Err(ApiError::NotFound(format!(
            "Row {} is out of range (1-{})",
            req.index,
            session.len()
        )));
    }
    session.navigate(req.index - 1)?;

    Ok(Json(SessionView::new(&session, state.llm_provider_name.clone())))
}

/// POST /api/next
pub async fn next_row(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
    let mut session = state.session.write().await;
    if !session.next() {
        return Err(ApiError::Conflict("Already at the last row".to_string()));
    }
    Ok(Json(SessionView::new(&session, state.llm_provider_name.clone())))
}

/// POST /api/previous
pub async fn previous_row(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
    let mut session = state.session.write().await;
    if !session.previous() {
        return Err(ApiError::Conflict("Already at the first row".to_string()));
    }
    Ok(Json(SessionView::new(&session, state.llm_provider_name.clone())))
}
