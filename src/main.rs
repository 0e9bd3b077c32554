mod config;
mod cursor;
mod daemon;
mod hypr_client;
mod ipc;
mod keyboard_monitor;
mod keys;
mod presenter;
mod socket_client;
mod socket_server;
mod window_list;

use anyhow::Result;
use config::Config;
use daemon::Daemon;
use ipc::Command;
use keyboard_monitor::KeyboardMonitor;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

fn main() -> Result<()> {
    // Parse CLI arguments
    let config = Config::parse();

    // Initialize logging
    let log_level = if config.verbose() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let socket_path = ipc::get_socket_path()?;

    // Singleton probe: one bounded synchronous wait, before any event loop
    // exists. A reachable listener means another instance owns the window
    // list and this process only relays its tokens.
    if let Some(stream) = socket_client::probe_primary(&socket_path, socket_client::PROBE_TIMEOUT)
    {
        info!("Primary already running, forwarding tokens");
        socket_client::forward_tokens(stream, &config.command_tokens())?;
        return Ok(());
    }

    // This process is the primary. Classify its own tokens: next/back seed
    // the initial cue (last one wins), anything else is reported and ignored.
    let (cue, invalid) = ipc::classify_cue(&config.command_tokens());
    for token in &invalid {
        eprintln!("Invalid argument: {}", token);
    }

    info!("Starting hypr-alttab primary instance");

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_primary(socket_path, cue))
}

/// Run the primary: bind the instance listener, take the window snapshot,
/// present the list, and multiplex key events and forwarded commands until
/// a selection is activated.
async fn run_primary(socket_path: PathBuf, cue: Option<Command>) -> Result<()> {
    let (cmd_rx, _socket_guard) = match socket_server::start_server(&socket_path).await {
        Ok(server) => server,
        Err(e) => {
            error!("{}", e);
            std::process::exit(-1);
        }
    };

    let mut daemon = Daemon::new();
    daemon.load_windows();

    // Key capture is a collaborator: without a readable keyboard device the
    // primary still serves forwarded next/back tokens.
    let (key_tx, key_rx) = mpsc::unbounded_channel();
    match KeyboardMonitor::new() {
        Ok(monitor) => {
            std::thread::spawn(move || {
                if let Err(e) = monitor.monitor_blocking(key_tx) {
                    error!("Keyboard monitor error: {}", e);
                }
            });
        }
        Err(e) => {
            warn!("Key capture unavailable, running IPC-only: {:#}", e);
        }
    }

    daemon.show(cue);

    daemon.run(cmd_rx, key_rx).await
}
