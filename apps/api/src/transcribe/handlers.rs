//! Axum route handler for audio transcription uploads.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub transcript: String,
}

/// POST /api/v1/transcribe
///
/// Accepts a multipart upload with a `file` field (wav/mp3/flac…) and returns
/// the plain-text transcript.
pub async fn handle_transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscribeResponse>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let file_name = field
                .file_name()
                .unwrap_or("audio.wav")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
            upload = Some((file_name, bytes.to_vec()));
        }
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| AppError::Validation("missing 'file' field".to_string()))?;
    if bytes.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }

    let transcript = state
        .llm
        .transcribe(&file_name, bytes)
        .await
        .map_err(|e| AppError::Llm(format!("transcription failed: {e}")))?;

    Ok(Json(TranscribeResponse { transcript }))
}
