use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // Malformed or missing input from the client.
    #[error("{0}")]
    Validation(String),

    // A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    // Requested seats are no longer available.
    #[error("{0}")]
    Conflict(String),

    // Operator-facing data problems: missing price rows, zero-seat classes.
    #[error("{0}")]
    Configuration(String),

    // Underlying storage failure. The raw error is logged where it happened
    // and never reaches the client.
    #[error("storage failure during {operation}")]
    Storage {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl AppError {
    pub fn storage(operation: &'static str, source: sqlx::Error) -> Self {
        AppError::Storage { operation, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Configuration(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Storage { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_categories_to_status_codes() {
        let cases = [
            (AppError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (AppError::Conflict("taken".into()), StatusCode::CONFLICT),
            (
                AppError::Configuration("no pricing".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::storage("seats.list", sqlx::Error::PoolClosed),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn storage_errors_render_opaque_message() {
        let err = AppError::storage("bookings.create", sqlx::Error::PoolClosed);
        assert_eq!(err.to_string(), "storage failure during bookings.create");
    }
}
