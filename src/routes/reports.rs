use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::report::ReportRequest;

#[derive(Debug, Serialize)]
pub struct GenerateReportResponse {
    pub status: &'static str,
    pub file_path: String,
}

pub async fn generate_report(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> AppResult<Json<GenerateReportResponse>> {
    let Json(request) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let report = request.validate()?;

    let generated = state.generator.generate(report).await?;

    Ok(Json(GenerateReportResponse {
        status: "ok",
        file_path: generated.file_path.display().to_string(),
    }))
}
