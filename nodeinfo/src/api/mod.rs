//! REST APIハンドラー
//!
//! パス・メソッドを区別せず、すべてのリクエストに識別情報を返す。

/// 識別情報を返すハンドラー
pub mod status;

use crate::AppState;
use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// APIルーターを作成
///
/// ルートは登録せずフォールバックのみで応答するため、
/// 任意のメソッド・任意のパスが `status::report_identity` に到達する。
/// アクセスログはデフォルトのフィルタ（info）で出力される。
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .fallback(status::report_identity)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
