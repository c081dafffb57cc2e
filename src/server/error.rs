//! API error responses
//!
//! Every handler error becomes a JSON body of the form
//! `{"error": "<status text>", "message": "<detail>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::calculators::CalcError;
use crate::hiscores::HiscoresError;
use crate::skills::{CatalogError, ProjectionError};
use crate::xp::XpError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{status}: {self}");
        } else {
            log::debug!("{status}: {self}");
        }
        let body = ErrorBody {
            error: status.canonical_reason().unwrap_or("Error"),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<XpError> for ApiError {
    fn from(err: XpError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ProjectionError> for ApiError {
    fn from(err: ProjectionError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<CalcError> for ApiError {
    fn from(err: CalcError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(name) => {
                Self::NotFound(format!("Unknown skill: {name}"))
            }
            CatalogError::EmptyName => Self::Validation(err.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<HiscoresError> for ApiError {
    fn from(err: HiscoresError) -> Self {
        match err {
            HiscoresError::InvalidUsername => Self::Validation(err.to_string()),
            HiscoresError::PlayerNotFound => Self::NotFound(err.to_string()),
            other => Self::Upstream(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(HiscoresError::InvalidUsername).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(HiscoresError::PlayerNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(CatalogError::NotFound("smithing".to_string())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(CalcError::NonPositive { field: "quantity" }).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
