//! Axum route handler for technology extraction.

use std::collections::BTreeSet;

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::tech::extract_tech;

#[derive(Debug, Deserialize)]
pub struct ExtractTechRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractTechResponse {
    pub technologies: BTreeSet<String>,
}

/// POST /api/v1/tech/extract
///
/// Extracts technology keywords from a job posting or similar text.
pub async fn handle_extract_tech(
    Json(request): Json<ExtractTechRequest>,
) -> Result<Json<ExtractTechResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    Ok(Json(ExtractTechResponse {
        technologies: extract_tech(&request.text),
    }))
}
