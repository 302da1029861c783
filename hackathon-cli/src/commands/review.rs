//! `hackathon select <id>` and `hackathon reject <id>` — admin transitions.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hackathon_core::ApplicationStatus;

#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Exact application ID.
    pub application_id: String,
}

impl ReviewArgs {
    pub fn run(self, data_dir: Option<PathBuf>, status: ApplicationStatus) -> Result<()> {
        let mut registry = super::open_registry(data_dir)?;
        let id = self.application_id.as_str();
        let outcome = match status {
            ApplicationStatus::Selected => registry.select_team(id),
            ApplicationStatus::Rejected => registry.reject_team(id),
            ApplicationStatus::Pending => {
                anyhow::bail!("applications cannot be moved back to pending")
            }
        };
        outcome.with_context(|| format!("failed to mark '{id}' as {status}"))?;

        let team = registry
            .application(id)
            .map(|app| app.team_name.as_str())
            .unwrap_or(id);
        println!("✓ '{team}' ({id}) is now {}", super::status_badge(status));
        Ok(())
    }
}
