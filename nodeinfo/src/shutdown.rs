//! Cooperative shutdown controller.
//!
//! OS signals are translated into a `ShutdownController` request so that the
//! peer monitor can be stopped (and tested) without real signals.

use crate::common::NodeInfoError;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::Notify;
use tracing::info;

/// Cooperative shutdown signal shared between the signal listener and the monitor.
#[derive(Clone, Debug, Default)]
pub struct ShutdownController {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    requested: AtomicBool,
    notify: Notify,
}

impl ShutdownController {
    /// Returns true if shutdown has been requested.
    pub fn is_shutdown_requested(&self) -> bool {
        self.inner.requested.load(Ordering::SeqCst)
    }

    /// Request shutdown and wake all waiters.
    pub fn request_shutdown(&self) {
        self.inner.requested.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    /// Wait until shutdown is requested.
    pub async fn wait(&self) {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        // Register before checking the flag so a concurrent request is not missed.
        notified.as_mut().enable();
        if self.is_shutdown_requested() {
            return;
        }
        notified.await;
    }
}

/// 登録済みの終了シグナル（Ctrl+C / SIGTERM）
///
/// `install` の時点でハンドラーが登録されるため、それ以降に届いたシグナルは
/// プロセスを即座に終了させず、`listen_for_termination` で受け取れる。
#[derive(Debug)]
pub struct TerminationSignals {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
    #[cfg(not(unix))]
    ctrl_c: tokio::signal::windows::CtrlC,
}

impl TerminationSignals {
    /// シグナルハンドラーを同期的に登録する（tokioランタイム内で呼ぶこと）
    #[cfg(unix)]
    pub fn install() -> Result<Self, NodeInfoError> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt()).map_err(NodeInfoError::Signal)?,
            terminate: signal(SignalKind::terminate()).map_err(NodeInfoError::Signal)?,
        })
    }

    /// シグナルハンドラーを同期的に登録する（tokioランタイム内で呼ぶこと）
    #[cfg(not(unix))]
    pub fn install() -> Result<Self, NodeInfoError> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c().map_err(NodeInfoError::Signal)?,
        })
    }
}

/// 終了シグナルを待ち、受信したらシャットダウンを要求する
///
/// 他の経路でシャットダウンが要求された場合はそのまま終了する。
pub async fn listen_for_termination(signals: TerminationSignals, shutdown: ShutdownController) {
    #[cfg(unix)]
    {
        let TerminationSignals {
            mut interrupt,
            mut terminate,
        } = signals;

        tokio::select! {
            _ = interrupt.recv() => {
                info!("Received Ctrl+C, shutting down...");
            }
            _ = terminate.recv() => {
                info!("Received SIGTERM, shutting down...");
            }
            _ = shutdown.wait() => {
                return;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let TerminationSignals { mut ctrl_c } = signals;

        tokio::select! {
            _ = ctrl_c.recv() => {
                info!("Received Ctrl+C, shutting down...");
            }
            _ = shutdown.wait() => {
                return;
            }
        }
    }

    shutdown.request_shutdown();
}
