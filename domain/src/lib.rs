use std::borrow::Cow;

pub mod models;
pub mod repositories;

/// ドメインエラーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainErrorKind {
    /// 検証エラー
    Validation,
    /// エンティティが存在しない
    NotFound,
    /// 認証されていない
    Unauthorized,
    /// ストアに接続できない
    StoreUnavailable,
    /// リポジトリエラー
    Repository,
}

/// ドメインエラー
#[derive(Debug, thiserror::Error)]
#[error("{}", .messages.join(", "))]
pub struct DomainError {
    /// エラーの種類
    pub kind: DomainErrorKind,
    /// エラーメッセージ
    pub messages: Vec<Cow<'static, str>>,
    /// エラーの原因
    #[source]
    pub source: anyhow::Error,
}

impl DomainError {
    /// メッセージからドメインエラーを構築する。
    ///
    /// 原因となるエラーが存在しない場合に使用する。
    pub fn with_message<M>(kind: DomainErrorKind, message: M) -> Self
    where
        M: Into<Cow<'static, str>>,
    {
        let message = message.into();
        Self {
            kind,
            source: anyhow::anyhow!(message.to_string()),
            messages: vec![message],
        }
    }
}

/// ドメイン結果
pub type DomainResult<T> = Result<T, DomainError>;

#[doc(hidden)]
pub fn starts_or_ends_with_whitespace(s: &str) -> bool {
    s.chars().next().is_some_and(|ch| ch.is_whitespace())
        || s.chars().last().is_some_and(|ch| ch.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case("abc", false)]
    #[case(" abc", true)]
    #[case("abc ", true)]
    #[case("a b c", false)]
    #[case("", false)]
    fn test_starts_or_ends_with_whitespace(#[case] s: &str, #[case] expected: bool) {
        assert_eq!(starts_or_ends_with_whitespace(s), expected);
    }

    #[test]
    fn test_domain_error_displays_joined_messages() {
        let error = DomainError {
            kind: DomainErrorKind::Validation,
            messages: vec!["first".into(), "second".into()],
            source: anyhow::anyhow!("first, second"),
        };
        assert_eq!(error.to_string(), "first, second");
    }

    #[test]
    fn test_domain_error_with_message() {
        let error = DomainError::with_message(DomainErrorKind::NotFound, "d001 is not found");
        assert_eq!(error.kind, DomainErrorKind::NotFound);
        assert_eq!(error.messages.len(), 1);
        assert_eq!(error.to_string(), "d001 is not found");
    }
}
