//! axumサーバー起動

use crate::common::NodeInfoError;
use crate::AppState;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// 指定アドレスにバインドする
pub async fn bind(bind_addr: &str) -> Result<TcpListener, NodeInfoError> {
    TcpListener::bind(bind_addr)
        .await
        .map_err(|source| NodeInfoError::Bind {
            addr: bind_addr.to_string(),
            source,
        })
}

/// バインド済みのリスナーでリクエストを処理し続ける
///
/// グレースフルシャットダウンは行わない。終了時は処理中のリクエストも破棄される。
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), NodeInfoError> {
    let app = crate::api::create_app(state);

    if let Ok(addr) = listener.local_addr() {
        info!("Listening on {}", addr);
    }

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(NodeInfoError::Serve)
}
