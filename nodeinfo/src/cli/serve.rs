//! サーバー起動オプション

use crate::health::peer_checker::{DEFAULT_PROBE_INTERVAL_SECS, DEFAULT_PROBE_TIMEOUT_MS};
use crate::health::PeerConfig;
use clap::Args;
use std::time::Duration;

/// サーバー起動オプション
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ServeArgs {
    /// Serve on port
    #[arg(short, long, default_value_t = 8050, env = "NODEINFO_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "NODEINFO_HOST")]
    pub host: String,

    /// Destination (peer) port
    #[arg(long, default_value_t = 8050, env = "NODEINFO_DPORT")]
    pub dport: u16,

    /// Destination (peer) IP or host name
    #[arg(long, default_value = "localhost", env = "NODEINFO_DIP")]
    pub dip: String,

    /// Seconds between peer probes
    #[arg(
        long,
        default_value_t = DEFAULT_PROBE_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        env = "NODEINFO_PROBE_INTERVAL_SECS"
    )]
    pub probe_interval_secs: u64,

    /// Timeout of a single peer probe in milliseconds
    #[arg(
        long,
        default_value_t = DEFAULT_PROBE_TIMEOUT_MS,
        value_parser = clap::value_parser!(u64).range(1..),
        env = "NODEINFO_PROBE_TIMEOUT_MS"
    )]
    pub probe_timeout_ms: u64,
}

impl ServeArgs {
    /// バインドアドレス（`host:port`）
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// ピア監視の設定
    pub fn peer_config(&self) -> PeerConfig {
        PeerConfig::new(self.dip.clone(), self.dport)
            .with_interval(Duration::from_secs(self.probe_interval_secs))
            .with_timeout(Duration::from_millis(self.probe_timeout_ms))
    }
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            port: 8050,
            host: "0.0.0.0".to_string(),
            dport: 8050,
            dip: "localhost".to_string(),
            probe_interval_secs: DEFAULT_PROBE_INTERVAL_SECS,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
        }
    }
}
