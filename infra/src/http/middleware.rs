use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse as _, Response},
};

use domain::{DomainError, DomainErrorKind};
use settings::GatewaySettings;
use use_case::RequestUser;

use crate::{AppState, http::ApiError};

/// ゲートウェイが匿名コンシューマーとして転送したことを示すヘッダー
const ANONYMOUS_CONSUMER_HEADER: &str = "x-anonymous-consumer";

const CONSUMER_MISSING_MESSAGE: &str = "The request was not authenticated by the API gateway";

/// API ゲートウェイが転送したコンシューマー情報から、リクエストを送信したユーザーを特定するミドルウェア
///
/// JWT はゲートウェイで検証済みであるため、ここではトークンを検証しない。
/// コンシューマー名のヘッダーが存在しない場合、または匿名コンシューマーとして転送された場合は、
/// 匿名ユーザーとして扱う。
/// ゲートウェイ設定でコンシューマーを要求している場合、匿名ユーザーのリクエストを拒否する。
pub async fn consumer_middleware<D>(
    State(app_state): State<AppState<D>>,
    mut request: Request,
    next: Next,
) -> Response
where
    D: Clone + Send + Sync + 'static,
{
    let settings = &app_state.app_settings.gateway;
    let request_user = request_user_from_headers(request.headers(), settings);
    if settings.require_consumer && !request_user.is_consumer() {
        tracing::info!(uri = %request.uri(), "rejected a request without a gateway consumer");
        let error =
            DomainError::with_message(DomainErrorKind::Unauthorized, CONSUMER_MISSING_MESSAGE);
        return ApiError::from(error).into_response();
    }
    request.extensions_mut().insert(request_user);
    next.run(request).await
}

/// HTTPリクエストヘッダーからリクエストを送信したユーザーを構築する。
pub fn request_user_from_headers(
    headers: &HeaderMap,
    settings: &GatewaySettings,
) -> RequestUser {
    let anonymous = header_value(headers, ANONYMOUS_CONSUMER_HEADER)
        .is_some_and(|value| value.eq_ignore_ascii_case("true"));
    if anonymous {
        return RequestUser::Anonymous;
    }
    match header_value(headers, &settings.consumer_username_header) {
        Some(username) => RequestUser::Consumer {
            username,
            id: header_value(headers, &settings.consumer_id_header),
        },
        None => RequestUser::Anonymous,
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
}
