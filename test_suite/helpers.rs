//! This module sets up and runs integration tests
//!
//! The integration test uses the same PostgreSQL container as the development environment.
//! But, it creates a separate test database for integration tests.
//! The test database is named in the format `test_department_db_<uuid>`,
//! where `<uuid>` is the UUID with hyphens replaced by underscores.
//!
//! [NOTICE]
//!
//! A test database is created for each test run, so you must drop the test databases
//! whose names start with `test_department_db_` by yourself.
use std::{path::Path, thread::JoinHandle};

use once_cell::sync::Lazy;
use sqlx::{Connection as _, Executor as _, PgConnection, PgPool};
use tokio::{net::TcpListener, sync::oneshot};

use app::{
    bind_address, create_pg_pool, get_subscriber, init_subscriber, load_app_settings,
    routes::create_router,
};
use infra::{AppState, postgres::repositories::PgDepartmentRepository};
use settings::{AppSettings, DatabaseSettings};

pub const TEST_DATABASE_PREFIX: &str = "test_department_db_";

static TRACING: Lazy<()> = Lazy::new(|| {
    let subscriber = get_subscriber(
        String::from("test_suite"),
        log::Level::Debug,
        std::io::stdout,
    );
    init_subscriber(subscriber).unwrap();
});

/// Loads the application settings from `app_settings.toml` in the workspace root
pub fn load_app_settings_for_testing() -> AppSettings {
    let dir = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set");
    let path = Path::new(&dir).join("..").join("app_settings.toml");
    load_app_settings(path.as_os_str().to_str().unwrap()).unwrap()
}

/// Enables tracing output once per test binary
pub fn enable_tracing() {
    Lazy::force(&TRACING);
}

pub struct TestApp {
    pub app_settings: AppSettings,
    pub listener: TcpListener,
    pub pg_pool: PgPool,
}

pub async fn configure_test_app(mut app_settings: AppSettings) -> TestApp {
    // Set up the test database
    let database_name =
        format!("{}{}", TEST_DATABASE_PREFIX, uuid::Uuid::new_v4()).replace('-', "_");
    app_settings.database.name = database_name;
    let pg_pool = setup_database(&app_settings.database).await;

    // Specify a random port for the HTTP server to bind
    app_settings.http.port = 0;
    let (listener, port) = bind_address(&app_settings.http).await.unwrap();
    app_settings.http.port = port;

    TestApp {
        app_settings,
        listener,
        pg_pool,
    }
}

/// Sets up the PostgreSQL database for testing
async fn setup_database(settings: &DatabaseSettings) -> PgPool {
    // Connect to the **postgres** database
    let postgres_settings = DatabaseSettings {
        name: String::from("postgres"),
        ..settings.clone()
    };
    let mut conn = PgConnection::connect_with(&postgres_settings.connect_options())
        .await
        .unwrap();

    // Create the test database
    conn.execute(format!("CREATE DATABASE {};", settings.name).as_str())
        .await
        .unwrap();

    // Migrate the database
    let pool = PgPool::connect_with(settings.connect_options())
        .await
        .unwrap();
    sqlx::migrate!("../migrations").run(&pool).await.unwrap();

    pool
}

/// Spawns the application server in a separate thread
///
/// Returns a tuple containing the thread handle and a sender to signal for graceful shutdown.
pub async fn spawn_app(
    app_settings: AppSettings,
    listener: TcpListener,
) -> (JoinHandle<()>, oneshot::Sender<()>) {
    let (close_tx, close_rx) = oneshot::channel();

    let listener = listener.into_std().unwrap();
    let handle = std::thread::spawn(|| run_server(app_settings, listener, close_rx));
    (handle, close_tx)
}

/// Runs the application server with graceful shutdown support
///
/// The connection pool of the server is created on the runtime of the server thread.
fn run_server(
    app_settings: AppSettings,
    listener: std::net::TcpListener,
    close_rx: oneshot::Receiver<()>,
) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    rt.block_on(async move {
        let pg_pool = create_pg_pool(&app_settings.database).await.unwrap();
        let app_state = AppState {
            app_settings,
            department_repository: PgDepartmentRepository::new(pg_pool.clone()),
        };
        let router = create_router(app_state);
        let listener = TcpListener::from_std(listener).unwrap();
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                _ = close_rx.await;
            })
            .await
            .unwrap();
        pg_pool.close().await;
    });
}

pub struct ResponseParts {
    /// ステータスコード
    pub status_code: reqwest::StatusCode,
    /// ヘッダ
    pub headers: reqwest::header::HeaderMap,
    /// ボディ
    pub body: String,
}

pub async fn split_response(response: reqwest::Response) -> ResponseParts {
    ResponseParts {
        status_code: response.status(),
        headers: response.headers().clone(),
        body: response.text().await.unwrap().to_string(),
    }
}
