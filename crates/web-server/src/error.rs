use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use engine::EngineError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// The request body or query string could not be read into the expected shape.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Validation error: {0}")]
    Validation(#[from] core_types::CoreError),

    /// The store refused a write.
    #[error("{0}")]
    Rejected(database::DbError),

    #[error("Database error: {0}")]
    Database(#[from] database::DbError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

impl AppError {
    /// Classifies a failed write: invalid records stay validation errors, anything else is
    /// reported back to the client as a bad request.
    pub fn rejected(error: database::DbError) -> Self {
        match error {
            database::DbError::Validation(e) => AppError::Validation(e),
            other => AppError::Rejected(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

/// Converts our custom `AppError` into an HTTP response with a `{"detail": ...}` body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::InvalidRequest(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            AppError::Rejected(db_err) => {
                tracing::warn!(error = ?db_err, "Write rejected by the store.");
                (StatusCode::BAD_REQUEST, db_err.to_string())
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Engine(EngineError::InsufficientData { required, available }) => {
                tracing::info!(required, available, "Not enough data for evaluation.");
                (StatusCode::BAD_REQUEST, "Not enough data".to_string())
            }
            AppError::Engine(e @ EngineError::InvalidWindow(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Engine(engine_err) => {
                tracing::error!(error = ?engine_err, "Evaluation failed.");
                (StatusCode::INTERNAL_SERVER_ERROR, engine_err.to_string())
            }
        };

        let body = Json(json!({ "detail": detail }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn invalid_price_is_an_internal_error() {
        let (status, body) =
            render(AppError::Engine(EngineError::InvalidPrice { index: 1, price: 0.0 })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "detail": "Invalid price 0 at index 1" }));
    }

    #[tokio::test]
    async fn insufficient_data_is_a_bad_request() {
        let error = AppError::Engine(EngineError::InsufficientData { required: 20, available: 3 });
        let (status, body) = render(error).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": "Not enough data" }));
    }

    #[tokio::test]
    async fn database_failures_hide_their_cause() {
        let error = AppError::Database(database::DbError::ConnectionConfigError("secret".into()));
        let (status, body) = render(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "An internal database error occurred");
    }

    #[tokio::test]
    async fn refused_writes_are_bad_requests() {
        let error = AppError::rejected(database::DbError::ConnectionConfigError("down".into()));
        let (status, _) = render(error).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let invalid = core_types::CoreError::InvalidInput("close".into(), "must be > 0".into());
        let (status, _) = render(AppError::rejected(database::DbError::Validation(invalid))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
