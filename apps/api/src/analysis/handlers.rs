use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;

use crate::analysis::extract::{extract_text, MultipartFile};
use crate::auth::Authenticated;
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::state::AppState;

/// Multipart field carrying the resume upload.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub text: String,
}

/// POST /api/v1/analyze
pub async fn handle_analyze_upload(
    _auth: Authenticated,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let mut file = MultipartFile::new(field);
        let content = extract_text(&mut file).await?;
        return Ok(Json(state.analyzer.analyze(&content).await));
    }

    Err(AppError::Validation(format!(
        "Multipart field '{UPLOAD_FIELD}' is required"
    )))
}

/// POST /api/v1/analyze/text
pub async fn handle_analyze_text(
    _auth: Authenticated,
    State(state): State<AppState>,
    Json(req): Json<AnalyzeTextRequest>,
) -> Json<AnalysisResult> {
    Json(state.analyzer.analyze(&req.text).await)
}
