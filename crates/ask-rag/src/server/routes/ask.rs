//! Ask endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{AskRequest, QueryResponse};

/// Message returned when the request carries no usable question
pub const QUESTION_MISSING: &str = "question missing";

/// POST /ask - Answer a question from the indexed documents
pub async fn ask(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>> {
    let Json(request) = payload.map_err(|e| Error::invalid_request(e.body_text()))?;

    let question = request
        .question()
        .ok_or_else(|| Error::invalid_request(QUESTION_MISSING))?;

    let response = state.pipeline().answer(question).await?;

    Ok(Json(response))
}
