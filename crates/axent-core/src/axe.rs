//! Reference backend over the `axe` accessibility CLI.
//!
//! [`AxeDriver`] implements [`AutomationDriver`] by shelling out to the
//! third-party `axe` tool (`brew install cameroncooke/axe/axe`):
//! `describe-ui` for tree snapshots and `tap` for input. The tool is
//! synchronous, so every invocation runs under `spawn_blocking`.
//!
//! Richer backends (an on-device agent, a WebDriver bridge) plug in through
//! the same trait; this one exists so the library is usable out of the box
//! against a booted iOS simulator.

use std::process::Command;

use async_trait::async_trait;

use crate::driver::{AutomationDriver, DriverError};
use crate::node::AxNode;

/// An [`AutomationDriver`] backed by the `axe` CLI.
pub struct AxeDriver {
    udid: String,
}

impl AxeDriver {
    /// A driver targeting the simulator with the given UDID.
    pub fn new(udid: impl Into<String>) -> Self {
        Self { udid: udid.into() }
    }

    /// Whether the `axe` tool is on the PATH.
    pub fn is_installed() -> bool {
        Command::new("which")
            .arg("axe")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn run_axe(args: Vec<String>) -> Result<Vec<u8>, DriverError> {
        if !Self::is_installed() {
            return Err(DriverError::NotConnected);
        }

        let output = Command::new("axe").args(&args).output()?;
        if !output.status.success() {
            return Err(DriverError::CommandFailed(
                String::from_utf8_lossy(&output.stderr).to_string(),
            ));
        }
        Ok(output.stdout)
    }

    async fn run_axe_blocking(args: Vec<String>) -> Result<Vec<u8>, DriverError> {
        tokio::task::spawn_blocking(move || Self::run_axe(args))
            .await
            .map_err(|e| DriverError::CommandFailed(format!("axe task failed: {}", e)))?
    }
}

#[async_trait]
impl AutomationDriver for AxeDriver {
    async fn dump_tree(&self) -> Result<Vec<AxNode>, DriverError> {
        let stdout = Self::run_axe_blocking(vec![
            "describe-ui".to_string(),
            "--udid".to_string(),
            self.udid.clone(),
        ])
        .await?;

        serde_json::from_slice(&stdout).map_err(|e| DriverError::JsonParse(e.to_string()))
    }

    async fn tap_location(&self, x: f64, y: f64) -> Result<(), DriverError> {
        Self::run_axe_blocking(vec![
            "tap".to_string(),
            "-x".to_string(),
            x.round().to_string(),
            "-y".to_string(),
            y.round().to_string(),
            "--udid".to_string(),
            self.udid.clone(),
        ])
        .await?;
        Ok(())
    }
}
