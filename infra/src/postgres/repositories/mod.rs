mod department;

pub use department::*;

use domain::{DomainError, DomainErrorKind};

/// SQLxのエラーをドメインエラーに変換する。
///
/// データベースに到達できない場合は`StoreUnavailable`、それ以外は`Repository`とする。
pub fn repository_error(e: sqlx::Error) -> DomainError {
    let (kind, message) = match &e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => (
            DomainErrorKind::StoreUnavailable,
            "The database connection pool is not available",
        ),
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) => (
            DomainErrorKind::StoreUnavailable,
            "Failed to connect to the database",
        ),
        _ => (DomainErrorKind::Repository, "Failed to access the database"),
    };
    DomainError {
        kind,
        messages: vec![message.into()],
        source: e.into(),
    }
}
