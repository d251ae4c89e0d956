//! 共通型定義

/// エラー型
pub mod error;

/// IPアドレス正規化・ネットワークインターフェース列挙
pub mod ip;

pub use error::NodeInfoError;
