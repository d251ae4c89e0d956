//! ピアヘルスチェックモニター
//!
//! 一定間隔で設定済みピアにGETリクエストを送り、結果をログに出力する。
//! 結果はこのプロセスの状態（識別情報・終了コード）に一切影響しない。

/// ピアへのプローブと監視ループ
pub mod peer_checker;

pub use peer_checker::{PeerConfig, PeerHealthChecker, ProbeOutcome};
