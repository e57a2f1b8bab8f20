use crate::{
    DomainResult,
    models::{Department, DepartmentId},
};

/// 部署リポジトリ
///
/// 部署を保持するストアへの読み取り専用のアクセスを提供する。
/// 呼び出し元は、API ゲートウェイで認証済みであることを前提とする。
#[async_trait::async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// すべての部署を取得する。
    ///
    /// 順序は規定しない。
    async fn list_all(&self) -> DomainResult<Vec<Department>>;

    /// 部署をIDで取得する。
    ///
    /// # 戻り値
    ///
    /// 部署が存在しない場合は`None`
    async fn by_id(&self, id: &DepartmentId) -> DomainResult<Option<Department>>;
}
