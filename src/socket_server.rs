use crate::ipc::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// The instance socket could not be bound even after stale cleanup.
///
/// This is fatal: a failure here means an unresolvable environment problem
/// (permissions, unusable runtime dir), so it is never retried.
#[derive(Debug, thiserror::Error)]
#[error("cannot bind instance socket at {path}: {source}")]
pub struct InstanceBindError {
    path: PathBuf,
    #[source]
    source: std::io::Error,
}

/// Guard that removes the socket file when dropped
pub struct SocketGuard {
    path: PathBuf,
}

impl Drop for SocketGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if self.path.exists() {
                error!("Failed to remove socket file: {}", e);
            }
        } else {
            info!("Removed socket file at {}", self.path.display());
        }
    }
}

/// Bind the instance listener and start accepting secondary connections.
///
/// Returns a receiver for decoded commands and a guard that cleans up the
/// socket file. A stale socket left behind by a crashed primary is removed
/// before binding.
pub async fn start_server(
    socket_path: &Path,
) -> Result<(mpsc::UnboundedReceiver<Command>, SocketGuard), InstanceBindError> {
    if socket_path.exists() {
        info!("Removing stale socket at {}", socket_path.display());
        if let Err(e) = fs::remove_file(socket_path) {
            error!("Failed to remove stale socket: {}", e);
        }
    }

    let listener = UnixListener::bind(socket_path).map_err(|source| InstanceBindError {
        path: socket_path.to_path_buf(),
        source,
    })?;

    info!("Instance socket listening at {}", socket_path.display());

    let guard = SocketGuard {
        path: socket_path.to_path_buf(),
    };
    let (tx, rx) = mpsc::unbounded_channel();

    // Accept connections for the lifetime of the primary. Tokens within one
    // connection arrive in order; ordering across connections is up to the
    // scheduler, which is fine for rapid next/back key repeats.
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, _)) => {
                    let tx_clone = tx.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_client(stream, tx_clone).await {
                            debug!("Client connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    // Transient failures (e.g. EMFILE) can persist for a
                    // while; back off instead of spinning at error level.
                    error!("Failed to accept connection: {}", e);
                    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
                }
            }
        }
    });

    Ok((rx, guard))
}

/// Handle a single secondary connection.
///
/// Tokens are newline-framed and dispatched as they are decoded, not
/// batched. No response is sent back; delivery is one-way, best-effort.
async fn handle_client(
    stream: UnixStream,
    tx: mpsc::UnboundedSender<Command>,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream);
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(cmd) => {
                debug!("Received command: {}", cmd);
                if tx.send(cmd).is_err() {
                    debug!("Command channel closed, dropping connection");
                    break;
                }
            }
            Err(_) => {
                debug!("Ignoring unknown command token: {}", line.trim());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    async fn connect_and_send(path: &Path, payload: &str) {
        let mut stream = tokio::net::UnixStream::connect(path).await.expect("connect");
        stream.write_all(payload.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_tokens_from_one_connection_arrive_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("switcher.sock");
        let (mut rx, _guard) = start_server(&path).await.unwrap();

        connect_and_send(&path, "next\nnext\nback\n").await;

        assert_eq!(rx.recv().await, Some(Command::Next));
        assert_eq!(rx.recv().await, Some(Command::Next));
        assert_eq!(rx.recv().await, Some(Command::Back));
    }

    #[tokio::test]
    async fn test_unknown_tokens_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("switcher.sock");
        let (mut rx, _guard) = start_server(&path).await.unwrap();

        connect_and_send(&path, "teleport\n\nback\n").await;

        // Only the recognized token comes through.
        assert_eq!(rx.recv().await, Some(Command::Back));
    }

    #[tokio::test]
    async fn test_multiple_connections_all_delivered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("switcher.sock");
        let (mut rx, _guard) = start_server(&path).await.unwrap();

        connect_and_send(&path, "next\n").await;
        connect_and_send(&path, "back\n").await;

        let mut received = vec![rx.recv().await.unwrap(), rx.recv().await.unwrap()];
        received.sort_by_key(|c| c.to_string());
        assert_eq!(received, vec![Command::Back, Command::Next]);
    }

    #[tokio::test]
    async fn test_stale_socket_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("switcher.sock");

        // Simulate a crashed primary: a listener bound and abandoned
        // without removing its socket file.
        let stale = UnixListener::bind(&path).unwrap();
        drop(stale);
        assert!(path.exists());

        let (mut rx, _guard) = start_server(&path).await.unwrap();
        connect_and_send(&path, "next\n").await;
        assert_eq!(rx.recv().await, Some(Command::Next));
    }

    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("switcher.sock");

        let result = start_server(&path).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_guard_removes_socket_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("switcher.sock");

        let (_rx, guard) = start_server(&path).await.unwrap();
        assert!(path.exists());
        drop(guard);
        assert!(!path.exists());
    }
}
