//! Hyprland interaction via `hyprctl`.
//!
//! The trait abstracts the two operations the switcher needs (snapshot
//! query and dispatch) so tests can verify dispatch ordering with a mock.

use anyhow::{Context, Result};
use std::process::Command;
use tracing::debug;

/// Compositor operations consumed by the switcher.
pub trait HyprClient {
    /// Query the full client list as raw JSON (`hyprctl clients -j`).
    fn clients_json(&mut self) -> Result<String>;

    /// Issue a dispatch (`hyprctl dispatch <args>`). Fire-and-forget:
    /// output is ignored apart from diagnostics.
    fn dispatch(&mut self, args: &str) -> Result<()>;
}

/// Real implementation shelling out to `hyprctl`.
pub struct HyprctlClient;

impl HyprctlClient {
    pub fn new() -> Self {
        HyprctlClient
    }
}

impl Default for HyprctlClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HyprClient for HyprctlClient {
    fn clients_json(&mut self) -> Result<String> {
        debug!("Executing: hyprctl clients -j");
        let output = Command::new("hyprctl")
            .args(["clients", "-j"])
            .output()
            .context("Failed to run hyprctl clients -j")?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn dispatch(&mut self, args: &str) -> Result<()> {
        debug!("Executing: hyprctl dispatch {}", args);
        let output = Command::new("hyprctl")
            .arg("dispatch")
            .args(args.split_whitespace())
            .output()
            .with_context(|| format!("Failed to run hyprctl dispatch {}", args))?;

        debug!("-- {}", String::from_utf8_lossy(&output.stdout).trim());

        Ok(())
    }
}
