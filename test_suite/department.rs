use reqwest::StatusCode;

use domain::{models::DepartmentId, repositories::DepartmentRepository as _};
use infra::postgres::repositories::PgDepartmentRepository;

use crate::helpers::{ResponseParts, load_app_settings_for_testing, split_response};
use crate::test_case::{
    CONSUMER_USERNAME, EnableTracing, InsertTestData, RawDepartmentResponseBody,
    RawErrorResponseBody, TEST_DEPARTMENTS, TestCase,
};

#[tokio::test]
#[ignore]
async fn consumer_can_list_departments() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::Yes).await;

    let response = test_case.department_list(Some(CONSUMER_USERNAME)).await;
    let ResponseParts {
        status_code, body, ..
    } = split_response(response).await;
    assert_eq!(
        status_code,
        StatusCode::OK,
        "Department list request failed: {}",
        status_code
    );
    let departments = serde_json::from_str::<Vec<RawDepartmentResponseBody>>(&body).unwrap();
    assert_eq!(
        departments.len(),
        TEST_DEPARTMENTS.len(),
        "Expected {} departments, found {}",
        TEST_DEPARTMENTS.len(),
        departments.len()
    );
    for (id, name) in TEST_DEPARTMENTS.iter() {
        assert!(
            departments.iter().any(|d| d.id == *id && d.name == *name),
            "{} is not found in the list",
            id
        );
    }

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn consumer_can_list_no_departments() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::No).await;

    let response = test_case.department_list(Some(CONSUMER_USERNAME)).await;
    let ResponseParts {
        status_code, body, ..
    } = split_response(response).await;
    assert_eq!(status_code, StatusCode::OK);
    let departments = serde_json::from_str::<Vec<RawDepartmentResponseBody>>(&body).unwrap();
    assert!(departments.is_empty());

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn anonymous_user_can_not_list_departments() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::Yes).await;

    let response = test_case.department_list(None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn consumer_can_get_every_listed_department_by_id() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::Yes).await;

    let response = test_case.department_list(Some(CONSUMER_USERNAME)).await;
    let departments = serde_json::from_str::<Vec<RawDepartmentResponseBody>>(
        &split_response(response).await.body,
    )
    .unwrap();
    for expected in departments {
        let response = test_case
            .department_by_id(&expected.id, Some(CONSUMER_USERNAME))
            .await;
        let ResponseParts {
            status_code, body, ..
        } = split_response(response).await;
        assert_eq!(status_code, StatusCode::OK);
        let department = serde_json::from_str::<RawDepartmentResponseBody>(&body).unwrap();
        assert_eq!(department, expected);
    }

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn consumer_can_not_get_a_missing_department() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::Yes).await;

    let response = test_case
        .department_by_id("d999", Some(CONSUMER_USERNAME))
        .await;
    let ResponseParts {
        status_code, body, ..
    } = split_response(response).await;
    assert_eq!(status_code, StatusCode::NOT_FOUND);
    let error = serde_json::from_str::<RawErrorResponseBody>(&body).unwrap();
    assert!(error.messages.iter().any(|m| m.contains("d999")));

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn anonymous_user_can_not_get_a_department_by_id() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::Yes).await;

    let response = test_case.department_by_id("d001", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn repository_lists_as_many_departments_as_stored() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::Yes).await;

    let repo = PgDepartmentRepository::new(test_case.pg_pool.clone());
    let departments = repo.list_all().await.unwrap();
    assert_eq!(departments.len(), TEST_DEPARTMENTS.len());
    for department in departments {
        let found = repo.by_id(&department.id).await.unwrap();
        assert_eq!(found, Some(department));
    }
    let missing = DepartmentId::new(String::from("d999")).unwrap();
    assert!(repo.by_id(&missing).await.unwrap().is_none());

    test_case.delete_departments().await;
    assert!(repo.list_all().await.unwrap().is_empty());

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn closed_store_is_unavailable() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::No).await;

    let pool = app::create_pg_pool(&test_case.app_settings.database)
        .await
        .unwrap();
    let repo = PgDepartmentRepository::new(pool.clone());
    pool.close().await;
    let error = repo.list_all().await.unwrap_err();
    assert_eq!(error.kind, domain::DomainErrorKind::StoreUnavailable);

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn department_id_with_surrounding_whitespace_can_not_be_stored() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::Yes).await;

    for id in [" d001", "d002 ", "\td005"] {
        let result = sqlx::query("INSERT INTO departments (id, name) VALUES ($1, $2)")
            .bind(id)
            .bind("Research")
            .execute(&test_case.pg_pool)
            .await;
        let error = result.expect_err("a padded department id must be rejected");
        let constraint = error
            .as_database_error()
            .and_then(|e| e.constraint())
            .map(String::from);
        assert_eq!(constraint.as_deref(), Some("ck_departments_id_not_blank"));
    }

    let repo = PgDepartmentRepository::new(test_case.pg_pool.clone());
    for department in repo.list_all().await.unwrap() {
        let found = repo.by_id(&department.id).await.unwrap();
        assert_eq!(found, Some(department));
    }

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn padded_department_id_is_reported_instead_of_being_trimmed() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::No).await;

    // Rows written before the constraint existed
    sqlx::query("ALTER TABLE departments DROP CONSTRAINT ck_departments_id_not_blank")
        .execute(&test_case.pg_pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO departments (id, name) VALUES ('d001', 'Marketing'), (' d001', 'Finance')",
    )
    .execute(&test_case.pg_pool)
    .await
    .unwrap();

    let repo = PgDepartmentRepository::new(test_case.pg_pool.clone());
    let error = repo.list_all().await.unwrap_err();
    assert_eq!(error.kind, domain::DomainErrorKind::Repository);

    let response = test_case.department_list(Some(CONSUMER_USERNAME)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    test_case.end().await;
}
