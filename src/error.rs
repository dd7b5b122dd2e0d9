use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

/// Failures raised by the file-backed stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A mandatory field was missing or malformed. Raised before any mutation.
    #[error("{0}")]
    Validation(String),

    /// A product with the same normalized code already exists.
    #[error("product code {0} already exists")]
    DuplicateCode(String),

    #[error("record not found")]
    NotFound,

    /// The backing file exists but does not hold well-formed store state.
    /// Fatal to store construction; callers must handle it explicitly.
    #[error("persist file {} is corrupt: {reason}", path.display())]
    CorruptPersist { path: PathBuf, reason: String },

    #[error("failed to serialize store state")]
    Encode(#[source] serde_json::Error),

    #[error("store i/o failed")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Store(err) => match err {
                StoreError::Validation(_) => StatusCode::BAD_REQUEST,
                StoreError::DuplicateCode(_) => StatusCode::CONFLICT,
                StoreError::NotFound => StatusCode::NOT_FOUND,
                StoreError::CorruptPersist { .. } | StoreError::Encode(_) | StoreError::Io(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData {
                error: self.to_string(),
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
