//! Status API (identity report).

use crate::identity::IdentityReport;
use crate::AppState;
use axum::{
    extract::{ConnectInfo, State},
    Json,
};
use std::net::SocketAddr;

/// ANY /*
///
/// 呼び出し元アドレスを記録し、リクエスト数を加算してから
/// 識別情報を返す。常に200。
pub async fn report_identity(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Json<IdentityReport> {
    Json(state.identity.record_request(addr))
}
