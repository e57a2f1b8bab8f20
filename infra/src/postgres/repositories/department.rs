use sqlx::PgPool;
use time::OffsetDateTime;

use domain::{
    DomainError, DomainErrorKind, DomainResult,
    models::{Department, DepartmentId, DepartmentName},
    repositories::DepartmentRepository,
    starts_or_ends_with_whitespace,
};

use crate::postgres::repositories::repository_error;

/// PostgreSQL部署リポジトリ
#[derive(Clone)]
pub struct PgDepartmentRepository {
    pub pool: PgPool,
}

impl PgDepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl DepartmentRepository for PgDepartmentRepository {
    #[tracing::instrument(skip(self), err)]
    async fn list_all(&self) -> DomainResult<Vec<Department>> {
        sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM departments
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(repository_error)?
        .into_iter()
        .map(Department::try_from)
        .collect::<Result<Vec<_>, _>>()
    }

    #[tracing::instrument(skip(self, id), fields(id = %id), err)]
    async fn by_id(&self, id: &DepartmentId) -> DomainResult<Option<Department>> {
        sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM departments
            WHERE id = $1
            "#,
        )
        .bind(&id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?
        .map(Department::try_from)
        .transpose()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DepartmentRow {
    id: String,
    name: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<DepartmentRow> for Department {
    type Error = DomainError;

    fn try_from(row: DepartmentRow) -> Result<Self, Self::Error> {
        let to_repository_error = |mut e: DomainError| {
            e.kind = DomainErrorKind::Repository;
            e.messages
                .insert(0, "The department row stored in the database is invalid".into());
            e
        };
        // IDは検索キーであるため、トリムせずにそのまま使用する
        if starts_or_ends_with_whitespace(&row.id) {
            return Err(to_repository_error(DomainError::with_message(
                DomainErrorKind::Validation,
                format!("The department id ({:?}) has leading or trailing whitespace", row.id),
            )));
        }
        Ok(Department {
            id: DepartmentId::new(row.id).map_err(to_repository_error)?,
            name: DepartmentName::new(row.name).map_err(to_repository_error)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, name: &str) -> DepartmentRow {
        let now = OffsetDateTime::now_utc();
        DepartmentRow {
            id: id.to_string(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_department_from_row() -> anyhow::Result<()> {
        let department = Department::try_from(row("d001", "Marketing"))?;
        assert_eq!(department.id.0, "d001");
        assert_eq!(department.name.0, "Marketing");
        Ok(())
    }

    #[rstest::rstest]
    #[case("", "Marketing")]
    #[case("d001", "")]
    #[case(" d001", "Marketing")]
    #[case("d002 ", "Finance")]
    #[case("\td003", "Human Resources")]
    fn test_invalid_row_is_a_repository_error(#[case] id: &str, #[case] name: &str) {
        let error = Department::try_from(row(id, name)).unwrap_err();
        assert_eq!(error.kind, DomainErrorKind::Repository);
    }

    #[test]
    fn test_padded_id_does_not_collide_with_stored_id() -> anyhow::Result<()> {
        let stored = Department::try_from(row("d001", "Marketing"))?;
        let padded = Department::try_from(row(" d001", "Marketing"));

        assert_eq!(stored.id.0, "d001");
        assert_eq!(padded.unwrap_err().kind, DomainErrorKind::Repository);
        Ok(())
    }
}
