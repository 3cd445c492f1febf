use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::domain::request::ValidationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    Validation(#[from] ValidationError),
    #[error("bad request: {message}")]
    BadRequest {
        code: &'static str,
        message: String,
    },
    #[error("internal error")]
    Internal { code: &'static str, message: String },
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub details: Value,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            code: "internal_error",
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            Self::Validation(error) => {
                let errors: Map<String, Value> = error
                    .fields()
                    .iter()
                    .map(|field| (field.field.to_string(), json!(field)))
                    .collect();
                (
                    StatusCode::BAD_REQUEST,
                    "validation_failed",
                    "Input payload validation failed".to_string(),
                    json!({ "errors": errors }),
                )
            }
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, code, message, json!({}))
            }
            Self::Internal { code, message } => {
                tracing::error!(error = %message, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    code,
                    "internal server error".to_string(),
                    json!({}),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                code: code.to_string(),
                message,
                details,
            }),
        )
            .into_response()
    }
}
