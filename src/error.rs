use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

/// Shown when an admin form is submitted with required fields missing.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Please fill in all required fields")]
    Validation(Vec<String>),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    /// A remote write or read failed; the message is the user-facing notice.
    #[error("{0}")]
    OperationFailed(String),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Log the underlying failure and replace it with a generic notice.
    /// Lookups that found nothing and caller mistakes pass through untouched.
    pub fn operation_failed(message: &str) -> impl FnOnce(AppError) -> AppError + '_ {
        move |err| match err {
            AppError::NotFound
            | AppError::BadRequest(_)
            | AppError::Validation(_)
            | AppError::Unauthorized
            | AppError::Forbidden => err,
            other => {
                tracing::error!(error = ?other, "{message}");
                AppError::OperationFailed(message.to_string())
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::OperationFailed(_)
            | AppError::DbError(_)
            | AppError::OrmError(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.to_string();
        let details = match self {
            AppError::Validation(details) => details,
            _ => Vec::new(),
        };

        let body = ApiResponse {
            message: message.clone(),
            data: Some(ErrorData {
                error: message,
                details,
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failures_become_the_generic_notice() {
        let err = AppError::operation_failed("Failed to update order status")(AppError::OrmError(
            sea_orm::DbErr::Custom("connection reset".into()),
        ));
        assert!(
            matches!(&err, AppError::OperationFailed(msg) if msg == "Failed to update order status")
        );
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn caller_errors_are_not_masked() {
        let err = AppError::operation_failed("Failed to delete product")(AppError::NotFound);
        assert!(matches!(err, AppError::NotFound));
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let err = AppError::Validation(vec!["name is required".into()]);
        assert_eq!(err.to_string(), REQUIRED_FIELDS_MESSAGE);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
