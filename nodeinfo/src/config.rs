//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with defaults,
//! and the identity fields that are injected through the environment
//! (e.g. by a Kubernetes downward API).

/// Environment variable carrying the node name
pub const NODE_NAME_ENV: &str = "SERVER_NAME";

/// Environment variable carrying the namespace
pub const NAMESPACE_ENV: &str = "NAMESPACE";

/// Environment variable carrying the log filter
pub const LOG_LEVEL_ENV: &str = "NODEINFO_LOG_LEVEL";

/// Get an environment variable, or a default value if unset
///
/// # Example
/// ```
/// use nodeinfo::config::get_env_or;
///
/// let level = get_env_or("NODEINFO_DOC_EXAMPLE_UNSET", "info");
/// assert_eq!(level, "info");
/// ```
pub fn get_env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// 環境変数から取得する識別情報
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityEnv {
    /// ノード名（`SERVER_NAME`）
    pub node_name: String,
    /// ネームスペース（`NAMESPACE`）
    pub namespace: String,
}

impl IdentityEnv {
    /// 環境変数から読み込む（未設定は空文字列）
    pub fn from_env() -> Self {
        Self {
            node_name: get_env_or(NODE_NAME_ENV, ""),
            namespace: get_env_or(NAMESPACE_ENV, ""),
        }
    }
}

/// ログレベル（フィルタ文字列）を取得
///
/// `NODEINFO_LOG_LEVEL` → `RUST_LOG` の順に参照し、未設定の場合は `info`。
pub fn get_log_level() -> String {
    std::env::var(LOG_LEVEL_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string())
}
