use domain::{
    DomainError, DomainErrorKind, DomainResult,
    models::{Department, DepartmentId},
    repositories::DepartmentRepository,
};

/// 部署ユースケース
pub struct DepartmentUseCase<R>
where
    R: DepartmentRepository,
{
    /// 部署リポジトリ
    pub repo: R,
}

impl<R> DepartmentUseCase<R>
where
    R: DepartmentRepository,
{
    /// 部署ユースケースを作成する。
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// すべての部署を取得する。
    pub async fn list_all(&self) -> DomainResult<Vec<Department>> {
        self.repo.list_all().await
    }

    /// 部署をIDで取得する。
    ///
    /// 部署が存在しない場合は、`DomainErrorKind::NotFound`のエラーを返す。
    pub async fn get_by_id(&self, id: &DepartmentId) -> DomainResult<Department> {
        self.repo.by_id(id).await?.ok_or_else(|| {
            DomainError::with_message(
                DomainErrorKind::NotFound,
                format!("The department ({}) is not found", id),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use time::OffsetDateTime;

    use domain::models::DepartmentName;

    use super::*;

    struct StubDepartmentRepository {
        departments: HashMap<DepartmentId, Department>,
        unavailable: bool,
    }

    impl StubDepartmentRepository {
        fn with(ids: &[&str]) -> Self {
            let departments = ids
                .iter()
                .map(|id| {
                    let department = department(id);
                    (department.id.clone(), department)
                })
                .collect();
            Self {
                departments,
                unavailable: false,
            }
        }

        fn unavailable() -> Self {
            Self {
                departments: HashMap::new(),
                unavailable: true,
            }
        }

        fn check(&self) -> DomainResult<()> {
            if self.unavailable {
                return Err(DomainError::with_message(
                    DomainErrorKind::StoreUnavailable,
                    "The store is unavailable",
                ));
            }
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl DepartmentRepository for StubDepartmentRepository {
        async fn list_all(&self) -> DomainResult<Vec<Department>> {
            self.check()?;
            Ok(self.departments.values().cloned().collect())
        }

        async fn by_id(&self, id: &DepartmentId) -> DomainResult<Option<Department>> {
            self.check()?;
            Ok(self.departments.get(id).cloned())
        }
    }

    fn department(id: &str) -> Department {
        let now = OffsetDateTime::now_utc();
        Department {
            id: DepartmentId::new(id.to_string()).unwrap(),
            name: DepartmentName::new(format!("Department {id}")).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest::rstest]
    #[case(&[])]
    #[case(&["d001"])]
    #[case(&["d001", "d002", "d003"])]
    #[tokio::test]
    async fn list_all_returns_every_department(#[case] ids: &[&str]) -> anyhow::Result<()> {
        let use_case = DepartmentUseCase::new(StubDepartmentRepository::with(ids));

        let departments = use_case.list_all().await?;

        assert_eq!(departments.len(), ids.len());
        Ok(())
    }

    #[tokio::test]
    async fn every_listed_department_can_be_got_by_its_id() -> anyhow::Result<()> {
        let use_case =
            DepartmentUseCase::new(StubDepartmentRepository::with(&["d001", "d002", "d003"]));

        for department in use_case.list_all().await? {
            let found = use_case.get_by_id(&department.id).await?;
            assert_eq!(found, department);
        }
        Ok(())
    }

    #[tokio::test]
    async fn get_by_id_fails_with_not_found_for_a_missing_department() -> anyhow::Result<()> {
        let use_case = DepartmentUseCase::new(StubDepartmentRepository::with(&["d001"]));
        let missing = DepartmentId::new(String::from("d999"))?;

        let error = use_case.get_by_id(&missing).await.unwrap_err();

        assert_eq!(error.kind, DomainErrorKind::NotFound);
        assert!(error.to_string().contains("d999"));
        Ok(())
    }

    #[tokio::test]
    async fn store_errors_are_propagated() -> anyhow::Result<()> {
        let use_case = DepartmentUseCase::new(StubDepartmentRepository::unavailable());
        let id = DepartmentId::new(String::from("d001"))?;

        let error = use_case.list_all().await.unwrap_err();
        assert_eq!(error.kind, DomainErrorKind::StoreUnavailable);
        let error = use_case.get_by_id(&id).await.unwrap_err();
        assert_eq!(error.kind, DomainErrorKind::StoreUnavailable);
        Ok(())
    }
}
