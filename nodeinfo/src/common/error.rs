//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! 起動時に致命的となる失敗のみをエラーとして扱う。定常運用中の失敗
//! （ピアへのプローブ失敗、インターフェース列挙失敗）は値として表現し、
//! ログ出力のみ行う。

use thiserror::Error;

/// nodeinfo error type
#[derive(Debug, Error)]
pub enum NodeInfoError {
    /// Listener could not be bound (e.g. port already in use)
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        /// Requested bind address
        addr: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// HTTP server terminated with an error
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    /// HTTP client for peer probing could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Logging subscriber could not be installed
    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    /// OS signal handler could not be installed
    #[error("Failed to install signal handler: {0}")]
    Signal(#[source] std::io::Error),

    /// Background task failed to join
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl NodeInfoError {
    /// プロセス終了コード
    ///
    /// 致命的エラーはすべて1で終了する。
    pub fn exit_code(&self) -> i32 {
        1
    }
}
