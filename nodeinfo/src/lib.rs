//! nodeinfo diagnostic server
//!
//! リクエストごとにホスト・ネットワーク識別情報を返し、
//! バックグラウンドで設定済みピアの死活監視を行う診断用HTTPサーバー

#![warn(missing_docs)]

/// 共通型定義（エラー型・IPユーティリティ）
pub mod common;

/// REST APIハンドラー
pub mod api;

/// ピアヘルスチェック監視
pub mod health;

/// 識別情報スナップショット
pub mod identity;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// CLIインターフェース
pub mod cli;

/// 起動・停止シーケンス
pub mod lifecycle;

/// axumサーバーのバインドと起動
pub mod server;

/// Shutdown controller (termination signals)
pub mod shutdown;

use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// プロセス全体で共有する識別情報スナップショット
    pub identity: Arc<identity::IdentitySnapshot>,
}

impl AppState {
    /// スナップショットから状態を作成
    pub fn new(identity: identity::IdentitySnapshot) -> Self {
        Self {
            identity: Arc::new(identity),
        }
    }
}
