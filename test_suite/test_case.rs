use std::{thread::JoinHandle, time::Duration};

use serde::Deserialize;
use sqlx::PgPool;
use time::{OffsetDateTime, serde::rfc3339};
use tokio::sync::oneshot;

use settings::AppSettings;

use crate::helpers::{TestApp, configure_test_app, enable_tracing, spawn_app};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The consumer name that the API gateway forwards after verifying the JWT
pub const CONSUMER_USERNAME: &str = "taro";

/// Departments inserted into the test database
pub const TEST_DEPARTMENTS: [(&str, &str); 4] = [
    ("d001", "Marketing"),
    ("d002", "Finance"),
    ("d003", "Human Resources"),
    ("d004", "Production"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnableTracing {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertTestData {
    Yes,
    No,
}

/// Test case for integration tests
///
/// ```
/// #[tokio::test]
/// async fn integration_test_case_skeleton() {
///     let app_settings = load_app_settings_for_testing();
///     let test_case = TestCase::begin(app_settings, EnableTracing::No, InsertTestData::Yes).await;
///
///     /************************************************************
///
///             Implement integration test logic here
///
///     *************************************************************/
///
///     test_case.end().await;
/// }
/// ```
pub struct TestCase {
    pub app_settings: AppSettings,
    pub pg_pool: PgPool,
    app_handle: JoinHandle<()>,
    shutdown_signal: oneshot::Sender<()>,
    pub http_client: reqwest::Client,
}

impl TestCase {
    pub async fn begin(
        app_settings: AppSettings,
        tracing: EnableTracing,
        insert_test_data: InsertTestData,
    ) -> Self {
        if tracing == EnableTracing::Yes {
            enable_tracing();
        }
        let TestApp {
            app_settings,
            listener,
            pg_pool,
        } = configure_test_app(app_settings).await;
        if insert_test_data == InsertTestData::Yes {
            insert_departments(&pg_pool, &TEST_DEPARTMENTS).await;
        }
        let (app_handle, shutdown_signal) = spawn_app(app_settings.clone(), listener).await;
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap();
        Self {
            app_settings,
            pg_pool,
            app_handle,
            shutdown_signal,
            http_client,
        }
    }

    pub async fn end(self) {
        tracing::debug!("Sending graceful shutdown signal...");
        self.shutdown_signal.send(()).unwrap();
        self.app_handle.join().unwrap();
        self.pg_pool.close().await;
        tracing::debug!("Server has gracefully shutdown.");
    }

    pub fn origin(&self) -> String {
        format!(
            "{}://{}:{}",
            self.app_settings.http.protocol,
            self.app_settings.http.host,
            self.app_settings.http.port,
        )
    }

    fn get(&self, path: &str, consumer: Option<&str>) -> reqwest::RequestBuilder {
        let uri = format!("{}{}", self.origin(), path);
        let request = self.http_client.get(&uri);
        match consumer {
            Some(consumer) => {
                request.header(&self.app_settings.gateway.consumer_username_header, consumer)
            }
            None => request,
        }
    }

    pub async fn department_list(&self, consumer: Option<&str>) -> reqwest::Response {
        self.get("/departments", consumer).send().await.unwrap()
    }

    pub async fn department_by_id(&self, id: &str, consumer: Option<&str>) -> reqwest::Response {
        self.get(&format!("/departments/{}", id), consumer)
            .send()
            .await
            .unwrap()
    }

    pub async fn delete_departments(&self) {
        sqlx::query("DELETE FROM departments")
            .execute(&self.pg_pool)
            .await
            .unwrap();
    }
}

async fn insert_departments(pool: &PgPool, departments: &[(&str, &str)]) {
    let mut tx = pool.begin().await.unwrap();
    for (id, name) in departments {
        sqlx::query("INSERT INTO departments (id, name) VALUES ($1, $2)")
            .bind(*id)
            .bind(*name)
            .execute(&mut *tx)
            .await
            .unwrap();
    }
    tx.commit().await.unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDepartmentResponseBody {
    pub id: String,
    pub name: String,
    #[serde(with = "rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawErrorResponseBody {
    pub messages: Vec<String>,
}
