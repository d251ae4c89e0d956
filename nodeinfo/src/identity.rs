//! 識別情報スナップショット
//!
//! 起動時に一度だけ構築し、プロセス終了まで保持する。
//! 可変なのは `last_caller` と `requests` のみで、それ以外は書き込み一回限り。

use crate::common::ip::{normalize_socket_addr, scan_local_addresses};
use crate::config::IdentityEnv;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// 応答に含めるバージョン文字列
pub const VERSION: &str = "0.5";

/// スナップショット構築時のパラメータ
#[derive(Debug, Clone)]
pub struct IdentityParams {
    /// ホスト名
    pub hostname: String,
    /// ノード名
    pub node_name: String,
    /// ネームスペース
    pub namespace: String,
    /// ローカルインターフェースのアドレス
    pub local_addresses: Vec<String>,
    /// 起動時刻
    pub started_at: DateTime<Utc>,
}

impl Default for IdentityParams {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            node_name: String::new(),
            namespace: String::new(),
            local_addresses: Vec::new(),
            started_at: Utc::now(),
        }
    }
}

/// プロセスの識別情報とリクエストカウンタ
#[derive(Debug)]
pub struct IdentitySnapshot {
    hostname: String,
    node_name: String,
    namespace: String,
    local_addresses: Vec<String>,
    started_at: DateTime<Utc>,
    last_caller: Mutex<String>,
    requests: AtomicU64,
}

/// JSONとして返す識別情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityReport {
    /// ホスト名
    #[serde(rename = "Hostname")]
    pub hostname: String,
    /// ノード名
    #[serde(rename = "Node")]
    pub node: String,
    /// ローカルIPアドレス一覧
    #[serde(rename = "IP")]
    pub ip: Vec<String>,
    /// 直近の呼び出し元アドレス
    #[serde(rename = "CallerIP")]
    pub caller_ip: String,
    /// 起動時刻（UTC）
    #[serde(rename = "UpSince")]
    pub up_since: DateTime<Utc>,
    /// バージョン
    #[serde(rename = "Version")]
    pub version: String,
    /// 累計リクエスト数
    #[serde(rename = "Requests")]
    pub requests: u64,
    /// ネームスペース
    #[serde(rename = "Namespace")]
    pub namespace: String,
}

impl IdentitySnapshot {
    /// パラメータからスナップショットを作成
    pub fn new(params: IdentityParams) -> Self {
        Self {
            hostname: params.hostname,
            node_name: params.node_name,
            namespace: params.namespace,
            local_addresses: params.local_addresses,
            started_at: params.started_at,
            last_caller: Mutex::new(String::new()),
            requests: AtomicU64::new(0),
        }
    }

    /// ホストから識別情報を収集してスナップショットを作成
    ///
    /// ホスト名・インターフェースの取得失敗は致命的ではなく、
    /// それぞれ空文字列・取得できた分のアドレスになる。
    pub fn capture(env: &IdentityEnv) -> Self {
        let hostname = match hostname::get() {
            Ok(name) => name.to_string_lossy().into_owned(),
            Err(e) => {
                debug!(error = %e, "Failed to resolve hostname");
                String::new()
            }
        };

        let scan = scan_local_addresses();
        if !scan.is_complete() {
            debug!(
                error = ?scan.error,
                found = scan.addresses.len(),
                "Interface enumeration incomplete"
            );
        }

        Self::new(IdentityParams {
            hostname,
            node_name: env.node_name.clone(),
            namespace: env.namespace.clone(),
            local_addresses: scan.into_addresses(),
            started_at: Utc::now(),
        })
    }

    /// リクエストを記録し、記録後の識別情報を返す
    ///
    /// 呼び出し元アドレスを上書きしてからカウンタを1増やす。
    pub fn record_request(&self, caller: SocketAddr) -> IdentityReport {
        let caller = normalize_socket_addr(&caller).to_string();
        *self
            .last_caller
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = caller;
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.report()
    }

    /// 現在の識別情報を返す
    pub fn report(&self) -> IdentityReport {
        IdentityReport {
            hostname: self.hostname.clone(),
            node: self.node_name.clone(),
            ip: self.local_addresses.clone(),
            caller_ip: self.last_caller(),
            up_since: self.started_at,
            version: VERSION.to_string(),
            requests: self.requests(),
            namespace: self.namespace.clone(),
        }
    }

    /// 累計リクエスト数
    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::SeqCst)
    }

    /// 直近の呼び出し元アドレス（未記録なら空文字列）
    pub fn last_caller(&self) -> String {
        self.last_caller
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 起動時刻
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// ホスト名
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// ローカルインターフェースのアドレス
    pub fn local_addresses(&self) -> &[String] {
        &self.local_addresses
    }
}
