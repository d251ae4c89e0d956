//! ピアヘルスチェッカー
//!
//! 状態遷移: Idle →(tick)→ Probing → Idle、Idle →(shutdown)→ Stopped。
//! プローブ中のシャットダウン要求はプローブ完了後に反映される。

use crate::common::NodeInfoError;
use crate::shutdown::ShutdownController;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};

/// デフォルトのプローブ間隔（秒）
pub const DEFAULT_PROBE_INTERVAL_SECS: u64 = 5;

/// デフォルトのプローブタイムアウト（ミリ秒）
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 1000;

/// ピア監視の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerConfig {
    /// ピアのホスト
    pub host: String,
    /// ピアのポート
    pub port: u16,
    /// プローブ間隔
    pub interval: Duration,
    /// 1回のプローブのタイムアウト
    pub timeout: Duration,
}

impl PeerConfig {
    /// デフォルトの間隔・タイムアウトで設定を作成
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            interval: Duration::from_secs(DEFAULT_PROBE_INTERVAL_SECS),
            timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
        }
    }

    /// プローブ間隔を設定
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// タイムアウトを設定
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// プローブ先URL
    pub fn url(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }
}

/// 1回のプローブ結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// 200 OK
    Healthy,
    /// 200以外のステータス
    UnexpectedStatus(StatusCode),
    /// 接続失敗・タイムアウトなどの通信エラー
    Unreachable(String),
}

impl ProbeOutcome {
    /// 200 OKだったかどうか
    pub fn is_healthy(&self) -> bool {
        matches!(self, ProbeOutcome::Healthy)
    }
}

/// ピアヘルスチェッカー
///
/// 一定間隔で `http://{host}:{port}/` にGETリクエストを送信し、
/// 結果をログに残す。リトライ・バックオフは行わない。
#[derive(Clone, Debug)]
pub struct PeerHealthChecker {
    /// HTTPクライアント（タイムアウト設定済み）
    client: Client,
    /// プローブ先URL
    url: String,
    /// プローブ間隔
    interval: Duration,
}

impl PeerHealthChecker {
    /// 新しいヘルスチェッカーを作成
    pub fn new(config: PeerConfig) -> Result<Self, NodeInfoError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            url: config.url(),
            interval: config.interval,
        })
    }

    /// プローブ先URL
    pub fn peer_url(&self) -> &str {
        &self.url
    }

    /// プローブ間隔
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// バックグラウンドで監視を開始
    ///
    /// タスクは停止までに実行したプローブ回数を返す。
    pub fn start(self, shutdown: ShutdownController) -> JoinHandle<u64> {
        tokio::spawn(async move { self.run(shutdown).await })
    }

    /// 監視ループ
    ///
    /// 最初のプローブは開始から1間隔後。プローブは直列に実行され、
    /// 同時に2つ以上が実行中になることはない。
    pub async fn run(self, shutdown: ShutdownController) -> u64 {
        let mut timer = interval_at(Instant::now() + self.interval, self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut probes = 0u64;
        loop {
            tokio::select! {
                biased;
                _ = shutdown.wait() => {
                    info!(probes, "Peer health checker stopped");
                    return probes;
                }
                _ = timer.tick() => {
                    self.probe().await;
                    probes += 1;
                }
            }
        }
    }

    /// ピアに1回だけプローブを送り、結果をログ出力して返す
    pub async fn probe(&self) -> ProbeOutcome {
        info!(peer = %self.url, "Checking siblings...");

        let outcome = match self.client.get(&self.url).send().await {
            Ok(response) if response.status() == StatusCode::OK => ProbeOutcome::Healthy,
            Ok(response) => ProbeOutcome::UnexpectedStatus(response.status()),
            Err(e) => ProbeOutcome::Unreachable(e.to_string()),
        };

        match &outcome {
            ProbeOutcome::Healthy => {
                info!(peer = %self.url, "200 OK");
            }
            ProbeOutcome::UnexpectedStatus(status) => {
                warn!(
                    peer = %self.url,
                    status = status.as_u16(),
                    "HTTP GET returned {}",
                    status.as_u16()
                );
            }
            ProbeOutcome::Unreachable(error) => {
                warn!(peer = %self.url, error = %error, "Error during HTTP GET ping");
            }
        }

        outcome
    }
}
