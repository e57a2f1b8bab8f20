pub mod department;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use domain::repositories::DepartmentRepository;
use infra::{AppState, http::handler::health_check};

use crate::routes::department::create_department_routes;

/// ルーターを作成する。
///
/// # 引数
///
/// * `app_state`: アプリケーション状態
pub fn create_router<D>(app_state: AppState<D>) -> Router
where
    D: DepartmentRepository + Clone + 'static,
{
    Router::new()
        .route("/health-check", get(health_check))
        .merge(create_department_routes(app_state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
