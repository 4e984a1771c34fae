use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    InvalidValue(String),
    // sqlx::Error を引数にするヴァリアントが複数あるので、[from] は使えず [source] で代用している
    #[error("Failed to run the transaction.")]
    TransactionError(#[source] sqlx::Error),
    #[error("An error occurred while processing a database operation.")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("The database is currently unavailable.")]
    StorageUnavailable(#[source] sqlx::Error),
    #[error("Not rows affected: {0}")]
    NoRowAffectedError(String),
    #[error("{0}")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("{0}")]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error("{0}")]
    BlockingTaskError(#[from] tokio::task::JoinError),
    #[error("{0}")]
    ConvertToUuidError(#[from] uuid::Error),
    #[error("Login failed")]
    UnauthenticatedError,
    #[error("Invalid authorization")]
    UnauthorizedError,
    #[error("Operation not permitted")]
    ForbiddenOperation,
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("{0}")]
    RequestBodyRejection(#[from] JsonRejection),
    #[error("{0}")]
    RequestPathRejection(#[from] PathRejection),
}

impl AppError {
    // 接続できない状態とクエリ自体の失敗を区別する
    pub fn from_database(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                AppError::StorageUnavailable(e)
            }
            e => AppError::SpecificOperationError(e),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_)
            | AppError::InvalidValue(_)
            | AppError::ConvertToUuidError(_) => StatusCode::BAD_REQUEST,
            AppError::UnauthenticatedError | AppError::ForbiddenOperation => StatusCode::FORBIDDEN,
            AppError::UnauthorizedError => StatusCode::UNAUTHORIZED,
            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::RequestBodyRejection(e) => e.status(),
            AppError::RequestPathRejection(e) => e.status(),
            AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowAffectedError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::BcryptError(_)
            | AppError::BlockingTaskError(_)
            | AppError::ConversionEntityError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        let message = if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
            match &self {
                AppError::StorageUnavailable(_) => self.to_string(),
                _ => "Internal server error".to_string(),
            }
        } else {
            self.to_string()
        };
        (status_code, Json(json!({ "error": message }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::EntityNotFound("Book not found".into()), StatusCode::NOT_FOUND)]
    #[case(AppError::InvalidValue("bad status".into()), StatusCode::BAD_REQUEST)]
    #[case(AppError::UnprocessableEntity("dup".into()), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(AppError::UnauthorizedError, StatusCode::UNAUTHORIZED)]
    #[case(AppError::UnauthenticatedError, StatusCode::FORBIDDEN)]
    #[case(
        AppError::StorageUnavailable(sqlx::Error::PoolTimedOut),
        StatusCode::SERVICE_UNAVAILABLE
    )]
    #[case(
        AppError::NoRowAffectedError("no book".into()),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn map_error_to_status(#[case] error: AppError, #[case] expected: StatusCode) {
        assert_eq!(error.into_response().status(), expected);
    }

    #[test]
    fn body_rejection_keeps_its_status() {
        let e = AppError::from(JsonRejection::from(
            axum::extract::rejection::MissingJsonContentType::default(),
        ));
        assert_eq!(e.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn pool_timeout_is_storage_unavailable() {
        let e = AppError::from_database(sqlx::Error::PoolTimedOut);
        assert!(matches!(e, AppError::StorageUnavailable(_)));
    }

    #[test]
    fn row_not_found_is_operation_error() {
        let e = AppError::from_database(sqlx::Error::RowNotFound);
        assert!(matches!(e, AppError::SpecificOperationError(_)));
    }
}
