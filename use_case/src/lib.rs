pub mod department;

/// リクエストを送信したユーザー
///
/// API ゲートウェイが JWT を検証した後に転送するコンシューマー情報から構築する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestUser {
    /// ゲートウェイで認証されたコンシューマー
    Consumer {
        /// コンシューマー名
        username: String,
        /// コンシューマーID
        id: Option<String>,
    },
    /// 匿名ユーザー
    Anonymous,
}

impl RequestUser {
    /// 認証済みのコンシューマーであるか確認する。
    pub fn is_consumer(&self) -> bool {
        matches!(self, Self::Consumer { .. })
    }
}
