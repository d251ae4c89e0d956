use std::{io, net::SocketAddr};

use nodeinfo::identity::{IdentityParams, IdentitySnapshot};
use nodeinfo::AppState;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

/// 汎用的にテスト用のHTTPサーバーを起動するためのユーティリティ
#[allow(dead_code)]
pub struct TestServer {
    addr: SocketAddr,
    state: AppState,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Result<(), io::Error>>,
}

#[allow(dead_code)]
impl TestServer {
    /// サーバーがバインドしているアドレスを返す
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `http://127.0.0.1:port/` 形式のベースURL
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// サーバーが共有している状態
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// サーバーを停止し、バックグラウンドタスクの終了を待つ
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.handle.await;
    }
}

/// テスト用の識別情報
#[allow(dead_code)]
pub fn test_identity() -> IdentitySnapshot {
    IdentitySnapshot::new(IdentityParams {
        hostname: "test-host".to_string(),
        node_name: "test-node".to_string(),
        namespace: "test-ns".to_string(),
        local_addresses: vec!["127.0.0.1".to_string()],
        ..IdentityParams::default()
    })
}

/// ステータスAPIを実ポートにバインドして起動する
#[allow(dead_code)]
pub async fn spawn_status_server(identity: IdentitySnapshot) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = AppState::new(identity);
    let router = nodeinfo::api::create_app(state.clone());
    let (tx, rx) = oneshot::channel();
    let handle = tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async {
            let _ = rx.await;
        })
        .await
    });

    TestServer {
        addr,
        state,
        shutdown: Some(tx),
        handle,
    }
}
