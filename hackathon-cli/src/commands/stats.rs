//! `hackathon stats` — landing-page counters.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatsArgs {
    pub fn run(self, data_dir: Option<PathBuf>) -> Result<()> {
        let registry = super::open_registry(data_dir)?;
        let stats = registry.stats();

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&stats).context("failed to serialize stats JSON")?
            );
            return Ok(());
        }

        println!("Applications: {}", stats.total_applications);
        println!("Projects:     {}", stats.total_projects);
        println!("Selected:     {}", stats.total_selected);
        Ok(())
    }
}
