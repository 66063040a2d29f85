//! Axum route handlers for the verifier endpoints.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::verifier::eval::{evaluate_detection, EvalReport, LabeledQuestion};
use crate::verifier::pipeline::{verify_hallucination, VerificationResult};

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub cases: Vec<LabeledQuestion>,
}

/// POST /api/v1/verify
///
/// Runs the three-step verification pipeline for one question.
pub async fn handle_verify(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerificationResult>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let result = verify_hallucination(&request.question, state.llm.as_ref()).await;

    Ok(Json(result))
}

/// POST /api/v1/verify/evaluate
///
/// Runs the pipeline over a labeled question set and reports accuracy.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvalReport>, AppError> {
    if request.cases.is_empty() {
        return Err(AppError::Validation("cases cannot be empty".to_string()));
    }

    let report = evaluate_detection(&request.cases, state.llm.as_ref()).await;

    Ok(Json(report))
}
