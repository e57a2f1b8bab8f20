use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, serde::rfc3339};

use domain::{
    models::{Department, DepartmentId},
    repositories::DepartmentRepository,
};
use use_case::{RequestUser, department::DepartmentUseCase};

use crate::{
    AppState,
    http::{ApiError, ApiResult},
};

/// 部署レスポンスボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentResponseBody {
    pub id: String,
    pub name: String,
    #[serde(with = "rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Department> for DepartmentResponseBody {
    fn from(department: Department) -> Self {
        Self {
            id: department.id.0,
            name: department.name.0,
            created_at: department.created_at,
            updated_at: department.updated_at,
        }
    }
}

fn department_use_case<D>(app_state: &AppState<D>) -> DepartmentUseCase<D>
where
    D: DepartmentRepository + Clone,
{
    DepartmentUseCase::new(app_state.department_repository.clone())
}

/// 部署一覧ハンドラ
#[tracing::instrument(skip(app_state))]
pub async fn list<D>(
    State(app_state): State<AppState<D>>,
    Extension(request_user): Extension<RequestUser>,
) -> ApiResult<Json<Vec<DepartmentResponseBody>>>
where
    D: DepartmentRepository + Clone + 'static,
{
    let use_case = department_use_case(&app_state);
    let departments = use_case.list_all().await.map_err(ApiError::from)?;
    tracing::debug!(count = departments.len(), "departments listed");
    Ok(Json(
        departments
            .into_iter()
            .map(DepartmentResponseBody::from)
            .collect(),
    ))
}

/// 部署取得ハンドラ
#[tracing::instrument(skip(app_state))]
pub async fn by_id<D>(
    State(app_state): State<AppState<D>>,
    Extension(request_user): Extension<RequestUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<DepartmentResponseBody>>
where
    D: DepartmentRepository + Clone + 'static,
{
    let id = DepartmentId::new(id).map_err(ApiError::from)?;
    let use_case = department_use_case(&app_state);
    let department = use_case.get_by_id(&id).await.map_err(ApiError::from)?;
    Ok(Json(DepartmentResponseBody::from(department)))
}
