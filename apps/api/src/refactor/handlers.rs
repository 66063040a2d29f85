//! Axum route handler for code refactoring.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::refactor::{refactor_code, RefactorResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RefactorRequest {
    pub code: String,
}

/// POST /api/v1/refactor
///
/// Refactors a code snippet and explains the improvements.
pub async fn handle_refactor(
    State(state): State<AppState>,
    Json(request): Json<RefactorRequest>,
) -> Result<Json<RefactorResult>, AppError> {
    if request.code.trim().is_empty() {
        return Err(AppError::Validation("code cannot be empty".to_string()));
    }

    let result = refactor_code(&request.code, state.llm.as_ref()).await;

    Ok(Json(result))
}
