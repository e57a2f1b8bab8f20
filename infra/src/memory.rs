use std::{collections::BTreeMap, sync::Arc};

use domain::{
    DomainError, DomainErrorKind, DomainResult,
    models::{Department, DepartmentId},
    repositories::DepartmentRepository,
};

/// インメモリ部署リポジトリ
///
/// 構築時に受け取った部署のスナップショットを保持する。
/// クローンしたリポジトリは同じスナップショットを共有する。
#[derive(Debug, Clone, Default)]
pub struct InMemoryDepartmentRepository {
    departments: Arc<BTreeMap<DepartmentId, Department>>,
}

impl InMemoryDepartmentRepository {
    /// インメモリ部署リポジトリを構築する。
    ///
    /// # 引数
    ///
    /// * `departments` - 部署
    ///
    /// # 戻り値
    ///
    /// 部署IDが重複している場合は検証エラー
    pub fn new<I>(departments: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = Department>,
    {
        let mut map = BTreeMap::new();
        for department in departments {
            let id = department.id.clone();
            if map.insert(id.clone(), department).is_some() {
                return Err(DomainError::with_message(
                    DomainErrorKind::Validation,
                    format!("The department id ({}) is duplicated", id),
                ));
            }
        }
        Ok(Self {
            departments: Arc::new(map),
        })
    }

    /// 保持している部署の数を返す。
    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }
}

#[async_trait::async_trait]
impl DepartmentRepository for InMemoryDepartmentRepository {
    async fn list_all(&self) -> DomainResult<Vec<Department>> {
        Ok(self.departments.values().cloned().collect())
    }

    async fn by_id(&self, id: &DepartmentId) -> DomainResult<Option<Department>> {
        Ok(self.departments.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use domain::models::DepartmentName;
    use time::OffsetDateTime;

    use super::*;

    fn department(id: &str, name: &str) -> Department {
        let now = OffsetDateTime::now_utc();
        Department {
            id: DepartmentId::new(id.to_string()).unwrap(),
            name: DepartmentName::new(name.to_string()).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    fn repository() -> InMemoryDepartmentRepository {
        InMemoryDepartmentRepository::new([
            department("d003", "Finance"),
            department("d001", "Marketing"),
            department("d002", "Human Resources"),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn list_all_returns_as_many_departments_as_stored() -> anyhow::Result<()> {
        let repo = repository();

        let departments = repo.list_all().await?;

        assert_eq!(departments.len(), repo.len());
        assert_eq!(departments.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn list_all_is_ordered_by_id() -> anyhow::Result<()> {
        let ids = repository()
            .list_all()
            .await?
            .into_iter()
            .map(|d| d.id.0)
            .collect::<Vec<_>>();

        assert_eq!(ids, ["d001", "d002", "d003"]);
        Ok(())
    }

    #[tokio::test]
    async fn every_listed_department_can_be_found_by_id() -> anyhow::Result<()> {
        let repo = repository();

        for department in repo.list_all().await? {
            let found = repo.by_id(&department.id).await?;
            assert_eq!(found, Some(department));
        }
        Ok(())
    }

    #[tokio::test]
    async fn by_id_returns_none_for_a_missing_department() -> anyhow::Result<()> {
        let repo = repository();
        let missing = DepartmentId::new(String::from("d999"))?;

        assert!(repo.by_id(&missing).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn empty_repository_lists_nothing() -> anyhow::Result<()> {
        let repo = InMemoryDepartmentRepository::default();

        assert!(repo.is_empty());
        assert!(repo.list_all().await?.is_empty());
        Ok(())
    }

    #[test]
    fn duplicated_ids_are_rejected() {
        let result = InMemoryDepartmentRepository::new([
            department("d001", "Marketing"),
            department("d001", "Finance"),
        ]);

        let error = result.unwrap_err();
        assert_eq!(error.kind, DomainErrorKind::Validation);
        assert!(error.to_string().contains("d001"));
    }

    #[tokio::test]
    async fn concurrent_reads_see_the_same_snapshot() -> anyhow::Result<()> {
        let repo = repository();
        let handles = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.list_all().await })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            assert_eq!(handle.await??.len(), 3);
        }
        Ok(())
    }
}
