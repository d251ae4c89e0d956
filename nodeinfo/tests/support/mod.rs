//! テスト用サポートユーティリティ

pub mod http;
