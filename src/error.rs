// src/error.rs
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use thiserror::Error;

use crate::gateway::WriteError;
use crate::models::notice::Notices;
use crate::modules::form::FormError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Not found because a read failed; the read's notices travel along.
    #[error("{message}")]
    NotFoundWith { message: String, notices: Notices },

    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn not_found_with(msg: impl Into<String>, notices: Notices) -> Self {
        AppError::NotFoundWith { message: msg.into(), notices }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Write(_) => StatusCode::BAD_GATEWAY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) | AppError::NotFoundWith { .. } => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            AppError::Config(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "Internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        // Failed writes and rejected forms are shown to the user as notices
        // next to the form, which keeps its input.
        let mut notices = Notices::new();
        match &self {
            AppError::Write(_) => notices.error(message.clone()),
            AppError::Validation(_) => notices.warning(message.clone()),
            AppError::NotFoundWith { notices: carried, .. } => notices = carried.clone(),
            _ => {}
        }

        let body = Json(json!({
            "error": message,
            "notices": notices,
        }));

        (status, body).into_response()
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        AppError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::WriteOp;
    use crate::store::StoreError;

    #[test]
    fn status_codes() {
        let write = AppError::from(WriteError {
            op: WriteOp::Insert,
            table: "productos".into(),
            source: StoreError::Unavailable("down".into()),
        });
        assert_eq!(write.into_response().status(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::unauthorized("x").into_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::forbidden("x").into_response().status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::validation("x").into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::not_found("x").into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::internal("x").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn not_found_keeps_read_notices() {
        let mut notices = Notices::new();
        notices.error("Error fetching data from productos: down");
        let response = AppError::not_found_with("Error fetching data from productos: down", notices)
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Error fetching data from productos: down");
        assert_eq!(body["notices"][0]["level"], "error");
        assert_eq!(body["notices"][0]["message"], "Error fetching data from productos: down");
    }

    #[test]
    fn form_errors_are_validation_errors() {
        let err: AppError = FormError::Empty.into();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Nothing to update"));
    }
}
