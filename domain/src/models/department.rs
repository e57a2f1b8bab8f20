use time::OffsetDateTime;

use crate::impl_string_primitive;

/// 部署ID
///
/// 部署を一意に識別する不透明な文字列で、空でないことのみを要求する。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, garde::Validate)]
pub struct DepartmentId(#[garde(length(chars, min = 1))] pub String);
impl_string_primitive!(DepartmentId);

/// 部署名
#[derive(Debug, Clone, PartialEq, Eq, Hash, garde::Validate)]
pub struct DepartmentName(#[garde(length(chars, min = 1, max = 100))] pub String);
impl_string_primitive!(DepartmentName);

/// 部署
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    /// ID
    pub id: DepartmentId,
    /// 部署名
    pub name: DepartmentName,
    /// 作成日時
    pub created_at: OffsetDateTime,
    /// 更新日時
    pub updated_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case("d001", "d001")]
    #[case(" d001", "d001")]
    #[case("d001 ", "d001")]
    #[case("a1b2-c3d4", "a1b2-c3d4")]
    #[case("営業部", "営業部")]
    fn test_department_id_ok(#[case] id: &str, #[case] expected: &str) -> anyhow::Result<()> {
        let id = DepartmentId::new(id.to_string())?;
        assert_eq!(id.0, expected);
        Ok(())
    }

    #[rstest::rstest]
    #[case("")]
    #[case(" ")]
    #[case("\t\n")]
    fn test_department_id_rejects_blank(#[case] id: &str) {
        let result = DepartmentId::new(id.to_string());
        match result {
            Err(e) => assert_eq!(e.kind, crate::DomainErrorKind::Validation),
            Ok(id) => panic!("Expected a validation error, but got {id}"),
        }
    }

    #[rstest::rstest]
    #[case(String::from("Marketing"), true)]
    #[case(String::from(" Finance "), true)]
    #[case(String::new(), false)]
    #[case("a".repeat(100), true)]
    #[case("a".repeat(101), false)]
    fn test_department_name(#[case] name: String, #[case] expected: bool) {
        assert_eq!(DepartmentName::new(name).is_ok(), expected);
    }
}
