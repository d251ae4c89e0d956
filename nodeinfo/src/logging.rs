//! ロギング初期化
//!
//! tracing-subscriber の fmt レイヤーを EnvFilter 付きで登録する。

use crate::common::NodeInfoError;
use crate::config::get_log_level;
use tracing_subscriber::EnvFilter;

/// グローバルなtracing subscriberを初期化する
///
/// フィルタは `NODEINFO_LOG_LEVEL` → `RUST_LOG` → `info` の順で決まる。
/// 二重に初期化した場合はエラーを返す。
pub fn init() -> Result<(), NodeInfoError> {
    let filter = build_filter(&get_log_level());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| NodeInfoError::Logging(e.to_string()))
}

/// フィルタ文字列を解釈する（不正な場合は `info`）
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}
