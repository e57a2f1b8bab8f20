pub mod http;
pub mod memory;
pub mod postgres;

use settings::AppSettings;

/// アプリケーション状態
///
/// 部署リポジトリの具象型は、型パラメーターとしてDIする。
#[derive(Clone)]
pub struct AppState<D> {
    /// アプリケーション設定
    pub app_settings: AppSettings,
    /// 部署リポジトリ
    pub department_repository: D,
}
