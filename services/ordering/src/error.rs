use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::sqlx::error::ErrorKind;
use sea_orm::{DbErr, RuntimeErr, SqlErr, sqlx};

/// Ordering service error variants.
///
/// Lookups that find nothing are not errors; they return `None` or an empty
/// list.
#[derive(Debug, thiserror::Error)]
pub enum OrderingServiceError {
    #[error("invalid reference: {0}")]
    InvalidReference(String),
    #[error("{0}")]
    ConstraintViolation(String),
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Persistence(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl OrderingServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidReference(_) => "INVALID_REFERENCE",
            Self::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::Validation(_) => "VALIDATION",
            Self::Persistence(_) => "PERSISTENCE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn is_server_error(&self) -> bool {
        matches!(self, Self::Persistence(_) | Self::Internal(_))
    }
}

/// Commit failures: constraint violations are told apart from other storage
/// faults, and both keep the engine's message.
impl From<DbErr> for OrderingServiceError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message))
            | Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
                Self::ConstraintViolation(message)
            }
            _ => match restrict_violation(&err) {
                Some(message) => Self::ConstraintViolation(message),
                None => Self::Persistence(err.to_string()),
            },
        }
    }
}

/// Foreign-key failures `sql_err` leaves unclassified: SQLite reports
/// `ON DELETE RESTRICT` as 1811, Postgres as 23001.
fn restrict_violation(err: &DbErr) -> Option<String> {
    let (DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(db_err)))
    | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(db_err)))) = err
    else {
        return None;
    };
    let foreign_key = db_err.kind() == ErrorKind::ForeignKeyViolation
        || matches!(db_err.code().as_deref(), Some("787" | "1811" | "23001"));
    foreign_key.then(|| db_err.message().to_owned())
}

impl IntoResponse for OrderingServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidReference(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ConstraintViolation(_) | Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // engine messages stay in the log for 5xx
        let message = if self.is_server_error() {
            tracing::error!(error = %self, kind = self.kind(), "internal error");
            "internal error".to_owned()
        } else {
            self.to_string()
        };
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": message,
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn assert_error(
        error: OrderingServiceError,
        expected_status: StatusCode,
        expected_kind: &str,
        expected_message: &str,
    ) {
        let resp = error.into_response();
        assert_eq!(resp.status(), expected_status);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["kind"], expected_kind);
        assert_eq!(json["message"], expected_message);
    }

    #[tokio::test]
    async fn should_return_invalid_reference() {
        assert_error(
            OrderingServiceError::InvalidReference("role 'Admin' does not exist".into()),
            StatusCode::UNPROCESSABLE_ENTITY,
            "INVALID_REFERENCE",
            "invalid reference: role 'Admin' does not exist",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_constraint_violation() {
        assert_error(
            OrderingServiceError::ConstraintViolation("UNIQUE constraint failed".into()),
            StatusCode::CONFLICT,
            "CONSTRAINT_VIOLATION",
            "UNIQUE constraint failed",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_user_already_exists() {
        assert_error(
            OrderingServiceError::UserAlreadyExists,
            StatusCode::CONFLICT,
            "USER_ALREADY_EXISTS",
            "user already exists",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_validation() {
        assert_error(
            OrderingServiceError::Validation("username is required".into()),
            StatusCode::BAD_REQUEST,
            "VALIDATION",
            "username is required",
        )
        .await;
    }

    #[tokio::test]
    async fn should_hide_persistence_message() {
        assert_error(
            OrderingServiceError::Persistence("connection reset".into()),
            StatusCode::INTERNAL_SERVER_ERROR,
            "PERSISTENCE",
            "internal error",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_internal() {
        assert_error(
            OrderingServiceError::Internal(anyhow::anyhow!("db error")),
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL",
            "internal error",
        )
        .await;
    }

    #[derive(Debug)]
    struct EngineError {
        code: &'static str,
        message: &'static str,
    }

    impl std::fmt::Display for EngineError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "(code: {}) {}", self.code, self.message)
        }
    }

    impl std::error::Error for EngineError {}

    impl sqlx::error::DatabaseError for EngineError {
        fn message(&self) -> &str {
            self.message
        }
        fn code(&self) -> Option<std::borrow::Cow<'_, str>> {
            Some(self.code.into())
        }
        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }
        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }
        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    fn exec_error(code: &'static str, message: &'static str) -> DbErr {
        DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(Box::new(
            EngineError { code, message },
        ))))
    }

    #[test]
    fn should_classify_restrict_delete_as_constraint_violation() {
        let err: OrderingServiceError =
            exec_error("1811", "FOREIGN KEY constraint failed").into();
        match err {
            OrderingServiceError::ConstraintViolation(message) => {
                assert_eq!(message, "FOREIGN KEY constraint failed")
            }
            other => panic!("expected ConstraintViolation, got {other:?}"),
        }

        let err: OrderingServiceError = exec_error("23001", "restrict violation").into();
        assert!(matches!(err, OrderingServiceError::ConstraintViolation(_)));
    }

    #[test]
    fn should_keep_other_engine_codes_as_persistence() {
        let err: OrderingServiceError = exec_error("5", "database is locked").into();
        match err {
            OrderingServiceError::Persistence(message) => {
                assert!(message.contains("database is locked"))
            }
            other => panic!("expected Persistence, got {other:?}"),
        }
    }

    #[test]
    fn should_classify_generic_db_error_as_persistence() {
        let err: OrderingServiceError = DbErr::Custom("disk full".into()).into();
        match err {
            OrderingServiceError::Persistence(message) => assert!(message.contains("disk full")),
            other => panic!("expected Persistence, got {other:?}"),
        }
    }
}
