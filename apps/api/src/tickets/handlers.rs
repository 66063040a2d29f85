//! Axum route handler for ticket classification.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::tickets::{classify, extract_entities, Category, Priority, TicketEntities};

#[derive(Debug, Deserialize)]
pub struct ClassifyTicketRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ClassifyTicketResponse {
    pub priority: Priority,
    pub category: Category,
    pub entities: TicketEntities,
}

/// POST /api/v1/tickets/classify
///
/// Classifies a ticket body and extracts its entities. Fully local.
pub async fn handle_classify_ticket(
    Json(request): Json<ClassifyTicketRequest>,
) -> Result<Json<ClassifyTicketResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let (priority, category) = classify(&request.text);
    let entities = extract_entities(&request.text);

    Ok(Json(ClassifyTicketResponse {
        priority,
        category,
        entities,
    }))
}
