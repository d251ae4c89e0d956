//! nodeinfo Server Entry Point

use clap::Parser;
use nodeinfo::cli::Cli;
use nodeinfo::shutdown::{listen_for_termination, ShutdownController, TerminationSignals};
use nodeinfo::{lifecycle, logging};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }

    info!("nodeinfo v{}", env!("CARGO_PKG_VERSION"));

    let state = lifecycle::build_state();

    // ハンドラーはspawn前に登録し、起動直後のSIGTERMも取りこぼさない
    let signals = match TerminationSignals::install() {
        Ok(signals) => signals,
        Err(e) => {
            error!("{}", e);
            std::process::exit(e.exit_code());
        }
    };

    let shutdown = ShutdownController::default();
    tokio::spawn(listen_for_termination(signals, shutdown.clone()));

    match lifecycle::run(cli.serve, state, shutdown).await {
        Ok(()) => {
            info!("Exiting");
            std::process::exit(lifecycle::SHUTDOWN_EXIT_CODE);
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}
