//! Axum route handler for the invoice parser endpoint.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::invoice::parser::{parse_invoice, InvoiceRecord};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ParseInvoiceRequest {
    pub invoice_text: String,
}

/// POST /api/v1/invoices/parse
///
/// Parses raw invoice text into a structured record with a confidence score.
pub async fn handle_parse_invoice(
    State(state): State<AppState>,
    Json(request): Json<ParseInvoiceRequest>,
) -> Result<Json<InvoiceRecord>, AppError> {
    if request.invoice_text.trim().is_empty() {
        return Err(AppError::Validation(
            "invoice_text cannot be empty".to_string(),
        ));
    }

    let record = parse_invoice(&request.invoice_text, state.llm.as_ref()).await;

    Ok(Json(record))
}
