//! 起動・停止シーケンス
//!
//! 起動順序: 設定解析 → 識別情報構築 → シグナル登録 → ピア監視開始 → リスナー起動。
//! 終了シグナル受信時はピア監視を停止させ、非0の終了コードで終了する。
//! HTTPリスナーのドレインは行わない。

use crate::cli::serve::ServeArgs;
use crate::common::NodeInfoError;
use crate::config::IdentityEnv;
use crate::health::PeerHealthChecker;
use crate::identity::IdentitySnapshot;
use crate::shutdown::ShutdownController;
use crate::{server, AppState};
use tracing::{info, warn};

/// シグナルによる終了時の終了コード
pub const SHUTDOWN_EXIT_CODE: i32 = 1;

/// 識別情報を収集してアプリケーション状態を構築する
pub fn build_state() -> AppState {
    let identity = IdentitySnapshot::capture(&IdentityEnv::from_env());
    info!(
        hostname = %identity.hostname(),
        addresses = ?identity.local_addresses(),
        up_since = %identity.started_at(),
        "Identity snapshot captured"
    );
    AppState::new(identity)
}

/// ピア監視とHTTPサーバーを起動し、シャットダウンまで待機する
///
/// シャットダウン要求後、ピア監視が停止した時点で `Ok(())` を返す。
/// 起動時の致命的エラー（バインド失敗など）は `Err` を返す。
pub async fn run(
    args: ServeArgs,
    state: AppState,
    shutdown: ShutdownController,
) -> Result<(), NodeInfoError> {
    let checker = PeerHealthChecker::new(args.peer_config())?;
    info!(
        peer = %checker.peer_url(),
        interval_ms = checker.interval().as_millis() as u64,
        "Peer health checker started"
    );
    let monitor = checker.start(shutdown.clone());

    let listener = match server::bind(&args.bind_addr()).await {
        Ok(listener) => listener,
        Err(e) => {
            shutdown.request_shutdown();
            return Err(e);
        }
    };

    tokio::select! {
        result = server::serve(listener, state) => {
            shutdown.request_shutdown();
            result?;
            warn!("HTTP server exited unexpectedly");
            Ok(())
        }
        probes = monitor => {
            let probes = probes?;
            info!(probes, "Peer health checker stopped, shutting down");
            Ok(())
        }
    }
}
