//! CLI module for nodeinfo
//!
//! Provides the command-line interface of the diagnostic server.

/// サーバー起動オプション
pub mod serve;

use clap::Parser;

/// nodeinfo - Reports host identity on every request and probes a sibling instance
#[derive(Parser, Debug)]
#[command(name = "nodeinfo")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    SERVER_NAME                   Node name reported as "Node" (default: empty)
    NAMESPACE                     Namespace reported as "Namespace" (default: empty)
    NODEINFO_LOG_LEVEL            Log filter (default: info, falls back to RUST_LOG)
"#)]
pub struct Cli {
    /// Server options
    #[command(flatten)]
    pub serve: serve::ServeArgs,
}
