use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, error_message) = match self {
            AppError::Analytics(err) => {
                let kind = err.kind();
                let status = match kind {
                    "csv_syntax" => StatusCode::BAD_REQUEST,
                    "missing_columns" | "invalid_amount" | "no_valid_rows" | "calculation" => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                if status.is_server_error() {
                    tracing::error!(error = ?err, "Report generation failed.");
                } else {
                    tracing::warn!(error = %err, kind, "Rejected upload.");
                }
                (status, kind, err.to_string())
            }
            AppError::Internal(message) => {
                tracing::error!(%message, "Internal error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message, "kind": kind }));
        (status, body).into_response()
    }
}
