pub mod handler;
pub mod middleware;

use std::borrow::Cow;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use domain::{DomainError, DomainErrorKind};

/// API結果
pub type ApiResult<T> = Result<T, ApiError>;

/// APIエラー
#[derive(Debug)]
pub struct ApiError {
    /// HTTPステータスコード
    pub status_code: StatusCode,
    /// エラーメッセージ
    pub messages: Vec<Cow<'static, str>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "messages": self.messages,
        });
        (self.status_code, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        let status_code = match error.kind {
            DomainErrorKind::Validation => StatusCode::BAD_REQUEST,
            DomainErrorKind::NotFound => StatusCode::NOT_FOUND,
            DomainErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            DomainErrorKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            DomainErrorKind::Repository => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status_code.is_server_error() {
            tracing::error!(error = ?error.source, "{}", error);
        }
        Self {
            status_code,
            messages: error.messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case(DomainErrorKind::Validation, StatusCode::BAD_REQUEST)]
    #[case(DomainErrorKind::NotFound, StatusCode::NOT_FOUND)]
    #[case(DomainErrorKind::Unauthorized, StatusCode::UNAUTHORIZED)]
    #[case(DomainErrorKind::StoreUnavailable, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(DomainErrorKind::Repository, StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_api_error_from_domain_error(
        #[case] kind: DomainErrorKind,
        #[case] expected: StatusCode,
    ) {
        let error = ApiError::from(DomainError::with_message(kind, "message"));
        assert_eq!(error.status_code, expected);
        assert_eq!(error.messages, vec![Cow::from("message")]);
    }
}
