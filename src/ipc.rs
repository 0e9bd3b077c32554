use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Command tokens relayed from a secondary invocation to the primary
/// instance, or seeded from the primary's own command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the selection forward (with wraparound).
    Next,
    /// Move the selection backward (with wraparound).
    Back,
}

/// Get the path of the instance rendezvous socket
pub fn get_socket_path() -> Result<PathBuf> {
    let runtime_dir = dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .context("Could not determine runtime directory")?;

    Ok(runtime_dir.join("hypr-alttab.sock"))
}

/// Error returned when parsing an unrecognized command token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCommandError;

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized command token")
    }
}

impl std::error::Error for ParseCommandError {}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "next" => Ok(Command::Next),
            "back" => Ok(Command::Back),
            _ => Err(ParseCommandError),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Command::Next => "next",
            Command::Back => "back",
        };
        write!(f, "{}", s)
    }
}

/// Classify command-line tokens into an initial cue and the tokens that
/// failed to parse. When several tokens are valid commands the last one
/// wins, mirroring how the primary applies a stream of forwarded tokens.
pub fn classify_cue(tokens: &[String]) -> (Option<Command>, Vec<String>) {
    let mut cue = None;
    let mut invalid = Vec::new();

    for token in tokens {
        match token.parse::<Command>() {
            Ok(cmd) => cue = Some(cmd),
            Err(_) => invalid.push(token.clone()),
        }
    }

    (cue, invalid)
}
