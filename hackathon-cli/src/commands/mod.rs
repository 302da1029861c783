//! Subcommand implementations. Each command opens the registry, performs one
//! operation (which persists on success) and renders the result.

pub mod apply;
pub mod list;
pub mod review;
pub mod stats;
pub mod status;
pub mod submit;

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use hackathon_core::{config, store, ApplicationStatus, FileStore, Registry};

/// Open the file-backed registry.
///
/// `--data-dir` overrides the directory from `~/.hackathon/config.yaml`; the
/// configured key prefix applies either way.
pub fn open_registry(data_dir: Option<PathBuf>) -> Result<Registry<FileStore>> {
    let home = store::home()?;
    let config = config::load_at(&home).context("failed to load hackathon config")?;
    let store = match data_dir {
        Some(dir) => FileStore::with_prefix(dir, config.key_prefix.clone()),
        None => config.file_store(&home),
    };
    let dir = store.dir().to_path_buf();
    tracing::debug!(dir = %dir.display(), "opening registry");
    Registry::open(store)
        .with_context(|| format!("failed to load registry from {}", dir.display()))
}

/// Capitalized status label, colored by outcome.
pub fn status_badge(status: ApplicationStatus) -> String {
    match status {
        ApplicationStatus::Pending => "Pending".yellow().bold().to_string(),
        ApplicationStatus::Selected => "Selected".green().bold().to_string(),
        ApplicationStatus::Rejected => "Rejected".red().bold().to_string(),
    }
}

/// `"beginner"` → `"Beginner"`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
