use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use opentelemetry::trace::TraceContextExt;
use serde_json::json;
use thiserror::Error;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::pdf::PdfError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Pdf(_) | AppError::Io(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text returned to the caller. Generation failures carry the underlying message.
    pub fn detail(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::Internal(msg) => msg.clone(),
            AppError::Pdf(e) => e.to_string(),
            AppError::Io(e) => e.to_string(),
        }
    }
}

fn get_trace_id() -> Option<String> {
    let span = Span::current();
    let context = span.context();
    let span_ref = context.span();
    let span_context = span_ref.span_context();

    if span_context.is_valid() {
        Some(span_context.trace_id().to_string())
    } else {
        None
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.detail();

        match &self {
            AppError::Validation(msg) => {
                tracing::warn!(error = %msg, "Rejected request");
            }
            AppError::Pdf(e) => {
                tracing::error!(error = %e, "PDF error");
            }
            AppError::Io(e) => {
                tracing::error!(error = %e, "IO error");
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
            }
        }

        let body = if let Some(trace_id) = get_trace_id() {
            json!({
                "detail": detail,
                "status": status.as_u16(),
                "trace_id": trace_id,
            })
        } else {
            json!({
                "detail": detail,
                "status": status.as_u16(),
            })
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::markup::MarkupError;

    #[test]
    fn test_validation_error() {
        let error = AppError::Validation("pages must be between 1 and 200".to_string());
        assert_eq!(
            error.to_string(),
            "Validation error: pages must be between 1 and 200"
        );
        assert_eq!(error.detail(), "pages must be between 1 and 200");
    }

    #[test]
    fn test_io_error_keeps_message() {
        let error = AppError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only file system",
        ));
        assert_eq!(error.detail(), "read-only file system");
    }

    #[test]
    fn test_pdf_error_keeps_message() {
        let error = AppError::from(PdfError::Markup(MarkupError::UnsupportedTag(
            "i".to_string(),
        )));
        assert_eq!(error.detail(), "invalid markup: unsupported tag <i>");
    }

    #[test]
    fn test_error_status_codes() {
        let test_cases = vec![
            (
                AppError::Validation("test".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::Io(std::io::Error::other("test")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Internal("test".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.status_code(), expected_status);
            assert_eq!(error.into_response().status(), expected_status);
        }
    }

    #[tokio::test]
    async fn test_error_body_carries_detail() {
        let response = AppError::Internal("disk full".to_string()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "disk full");
        assert_eq!(body["status"], 500);
    }

    #[test]
    fn test_app_result_err() {
        fn returns_err() -> AppResult<i32> {
            Err(AppError::Validation("test".to_string()))
        }
        assert!(returns_err().is_err());
    }
}
