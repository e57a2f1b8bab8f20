use axum::{Router, middleware, routing::get};

use domain::repositories::DepartmentRepository;
use infra::{
    AppState,
    http::{handler::department, middleware::consumer_middleware},
};

pub fn create_department_routes<D>(app_state: AppState<D>) -> Router<AppState<D>>
where
    D: DepartmentRepository + Clone + 'static,
{
    Router::new()
        .route("/departments", get(department::list::<D>))
        .route("/departments/{id}", get(department::by_id::<D>))
        .route_layer(middleware::from_fn_with_state(
            app_state,
            consumer_middleware::<D>,
        ))
}
