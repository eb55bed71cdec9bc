//! HTTP error responses.

use crate::application::error::CatalogError;
use crate::domain::user::Role;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{debug, error};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Role {0} required")]
    Forbidden(Role),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Request body too large")]
    PayloadTooLarge,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Catalog(CatalogError::NotFound(_)) | ApiError::Catalog(CatalogError::NoData(_)) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Catalog(CatalogError::AlreadyLiked { .. })
            | ApiError::Catalog(CatalogError::NotLiked { .. })
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Catalog(CatalogError::Repository(_))
            | ApiError::Catalog(CatalogError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            debug!("Request rejected ({}): {}", status, self);
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        match self {
            ApiError::Unauthorized => (
                status,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"vidcat\"")],
                body,
            )
                .into_response(),
            _ => (status, body).into_response(),
        }
    }
}
