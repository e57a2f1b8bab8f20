use enum_display::EnumDisplay;
use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// アプリケーション設定
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    /// HTTPサーバー設定
    pub http: HttpSettings,
    /// データベース設定
    pub database: DatabaseSettings,
    /// API ゲートウェイ設定
    pub gateway: GatewaySettings,
    /// ログ設定
    pub log: LogSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, EnumDisplay)]
#[serde(rename = "protocol")]
#[serde(rename_all = "lowercase")]
#[enum_display(case = "Lower")]
pub enum HttpProtocol {
    /// HTTPプロトコル
    Http,
    /// HTTPSプロトコル
    Https,
}

/// HTTPサーバー設定
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// プロトコル
    pub protocol: HttpProtocol,
    /// ホスト名
    pub host: String,
    /// ポート番号
    pub port: u16,
}

/// データベース設定
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// ホスト名
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// ユーザー名
    pub user: String,
    /// パスワード
    pub password: SecretString,
    /// データベース名
    pub name: String,
    /// 最大接続数
    pub max_connections: u32,
    /// 接続タイムアウト（秒）
    pub connection_timeout: u64,
    /// SSL接続を要求するか
    #[serde(default)]
    pub require_ssl: bool,
}

/// API ゲートウェイ設定
///
/// ゲートウェイは JWT を検証した後、コンシューマーの情報をヘッダーに設定して
/// リクエストを転送する。
#[derive(Debug, Clone, Deserialize)]
pub struct GatewaySettings {
    /// コンシューマー名を格納するヘッダー名
    #[serde(default = "default_consumer_username_header")]
    pub consumer_username_header: String,
    /// コンシューマーIDを格納するヘッダー名
    #[serde(default = "default_consumer_id_header")]
    pub consumer_id_header: String,
    /// 部署APIの呼び出しにコンシューマーを要求するか
    #[serde(default = "default_require_consumer")]
    pub require_consumer: bool,
}

/// ログ設定
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LogSettings {
    /// ログレベル
    pub level: log::Level,
}

fn default_consumer_username_header() -> String {
    String::from("x-consumer-username")
}

fn default_consumer_id_header() -> String {
    String::from("x-consumer-id")
}

fn default_require_consumer() -> bool {
    true
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            consumer_username_header: default_consumer_username_header(),
            consumer_id_header: default_consumer_id_header(),
            require_consumer: default_require_consumer(),
        }
    }
}

impl HttpSettings {
    /// バインドするアドレス（ホスト名とポート番号）を返す。
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseSettings {
    /// データベースへの接続オプションを返す。
    pub fn connect_options(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(self.password.expose_secret())
            .database(&self.name)
            .ssl_mode(ssl_mode)
    }
}
