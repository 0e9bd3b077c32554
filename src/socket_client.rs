use anyhow::{Context, Result};
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// How long a secondary is allowed to spend talking to the primary.
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Probe the instance rendezvous socket once at startup.
///
/// Returns a connected stream when a primary is already listening (this
/// process is a secondary). Any connection failure means no primary exists
/// and this process should claim the role itself; it is not an error.
///
/// This is the only blocking wait in the process and happens before any
/// event loop is created. Unix-domain connects fail immediately when
/// nothing is listening; the timeout bounds the sends that follow.
pub fn probe_primary(socket_path: &Path, timeout: Duration) -> Option<UnixStream> {
    match UnixStream::connect(socket_path) {
        Ok(stream) => {
            debug!("Connected to running primary at {}", socket_path.display());
            if let Err(e) = stream.set_write_timeout(Some(timeout)) {
                debug!("Failed to set write timeout: {}", e);
            }
            Some(stream)
        }
        Err(e) => {
            debug!("No primary instance ({}), claiming the role", e);
            None
        }
    }
}

/// Forward command tokens to the primary, one newline-framed token each,
/// then flush and close. No response is expected (one-way, best-effort).
pub fn forward_tokens(mut stream: UnixStream, tokens: &[String]) -> Result<()> {
    for token in tokens {
        debug!("Forwarding token: {}", token);
        writeln!(stream, "{}", token).context("Failed to forward token to primary")?;
    }
    stream.flush().context("Failed to flush instance socket")?;

    Ok(())
}
