pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::invoice::handlers as invoice_handlers;
use crate::refactor::handlers as refactor_handlers;
use crate::state::AppState;
use crate::tech::handlers as tech_handlers;
use crate::tickets::handlers as ticket_handlers;
use crate::transcribe::handlers as transcribe_handlers;
use crate::verifier::handlers as verifier_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Hallucination verifier
        .route("/api/v1/verify", post(verifier_handlers::handle_verify))
        .route(
            "/api/v1/verify/evaluate",
            post(verifier_handlers::handle_evaluate),
        )
        // Invoice parser
        .route(
            "/api/v1/invoices/parse",
            post(invoice_handlers::handle_parse_invoice),
        )
        // Local text analysis
        .route(
            "/api/v1/tickets/classify",
            post(ticket_handlers::handle_classify_ticket),
        )
        .route(
            "/api/v1/tech/extract",
            post(tech_handlers::handle_extract_tech),
        )
        // Code refactorer
        .route("/api/v1/refactor", post(refactor_handlers::handle_refactor))
        // Audio transcription (multipart)
        .route(
            "/api/v1/transcribe",
            post(transcribe_handlers::handle_transcribe),
        )
        .with_state(state)
}
