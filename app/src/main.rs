use anyhow::Context as _;
use secrecy::ExposeSecret as _;

use infra::{AppState, postgres::repositories::PgDepartmentRepository};

use app::{
    bind_address, create_pg_pool, get_subscriber, init_subscriber, load_app_settings,
    routes::create_router,
};

/// アプリケーション設定ファイル
const APP_SETTINGS_FILE: &str = "app_settings.toml";

/// アプリケーションエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // アプリケーション設定を読み込み
    let app_settings = load_app_settings(APP_SETTINGS_FILE)?;

    // トレーシングを初期化
    let subscriber = get_subscriber(
        String::from("department-service"),
        app_settings.log.level,
        std::io::stdout,
    );
    init_subscriber(subscriber)?;
    tracing::info!(
        http = ?app_settings.http,
        database_host = %app_settings.database.host,
        database_name = %app_settings.database.name,
        database_password_set = !app_settings.database.password.expose_secret().is_empty(),
        gateway = ?app_settings.gateway,
        "app settings loaded"
    );

    // データベース接続プールを作成
    let pg_pool = create_pg_pool(&app_settings.database).await?;

    // ルーターを作成
    let (listener, port) = bind_address(&app_settings.http).await?;
    let app_state = AppState {
        app_settings,
        department_repository: PgDepartmentRepository::new(pg_pool.clone()),
    };
    let router = create_router(app_state);

    // HTTPサーバーを起動
    tracing::info!(port, "HTTP server is running");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Failed to start the HTTP server")?;
    pg_pool.close().await;
    tracing::info!("HTTP server has shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for the shutdown signal");
        std::future::pending::<()>().await;
    }
}
