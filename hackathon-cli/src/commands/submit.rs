//! `hackathon submit <application-id> --name ... --theme ... [--link <url>]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hackathon_core::NewProject;

/// Submit the project for an application.
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Application ID printed by `hackathon apply`.
    pub application_id: String,

    /// Project name.
    #[arg(long)]
    pub name: String,

    /// Project theme or track.
    #[arg(long)]
    pub theme: String,

    /// Short description of the project.
    #[arg(long)]
    pub description: String,

    /// Technologies used.
    #[arg(long)]
    pub tech_stack: String,

    /// Link to a repository or demo.
    #[arg(long)]
    pub link: Option<String>,
}

impl SubmitArgs {
    pub fn run(self, data_dir: Option<PathBuf>) -> Result<()> {
        let mut registry = super::open_registry(data_dir)?;
        let id = self.application_id.clone();
        let project = registry
            .submit_project(NewProject {
                application_id: self.application_id,
                project_name: self.name,
                project_theme: self.theme,
                description: self.description,
                tech_stack: self.tech_stack,
                project_link: self.link,
            })
            .with_context(|| format!("project for application '{id}' was not accepted"))?;

        println!(
            "✓ Project '{}' submitted for team '{}'. We will review it soon.",
            project.project_name, project.team_name
        );
        Ok(())
    }
}
