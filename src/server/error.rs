use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("bad request")]
    BadRequest,

    #[error("resource not found")]
    NotFound,

    #[error("unprocessable")]
    Unprocessable,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type ApiResponse<T> = Result<T, ApiError>;

#[derive(Serialize)]
struct ErrorBody {
    error: u16,
    message: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(status: StatusCode) -> &'static str {
        match status {
            StatusCode::NOT_FOUND => "resource not found",
            StatusCode::UNPROCESSABLE_ENTITY => "unprocessable",
            _ => "bad request",
        }
    }

    /// Storage lookups that fail to find a row mean the payload points at
    /// something that doesn't exist.
    pub fn missing_as_unprocessable(err: sqlx::Error) -> ApiError {
        match err {
            sqlx::Error::RowNotFound => ApiError::Unprocessable,
            err => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Database(ref err) = self {
            if !matches!(err, sqlx::Error::RowNotFound) {
                tracing::error!("Storage failure: {err}");
            }
        }
        let body = ErrorBody {
            error: status.as_u16(),
            message: ApiError::message(status),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> ApiError {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        match rejection {
            JsonRejection::JsonDataError(_) => ApiError::Unprocessable,
            _ => ApiError::BadRequest,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> ApiError {
        tracing::warn!("Rejected query string: {}", rejection.body_text());
        ApiError::BadRequest
    }
}

// routes only take integer ids, anything else names no resource
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> ApiError {
        tracing::debug!("Rejected path: {}", rejection.body_text());
        ApiError::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn error_body_carries_code_and_message() {
        let (status, body) = body_of(ApiError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            serde_json::json!({"error": 404, "message": "resource not found"})
        );

        let (status, body) = body_of(ApiError::Unprocessable).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "unprocessable");
    }

    #[tokio::test]
    async fn storage_errors_downgrade() {
        let (status, body) = body_of(ApiError::Database(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], 404);

        let (status, body) = body_of(ApiError::Database(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "bad request");
    }

    #[test]
    fn missing_rows_become_unprocessable() {
        assert!(matches!(
            ApiError::missing_as_unprocessable(sqlx::Error::RowNotFound),
            ApiError::Unprocessable
        ));
        assert_eq!(
            ApiError::missing_as_unprocessable(sqlx::Error::PoolClosed).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
