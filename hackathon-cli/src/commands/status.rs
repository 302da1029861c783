//! `hackathon status <query>` — selection status by application ID or team name.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use hackathon_core::{ApplicationStatus, StatusLookup};

use super::{capitalize, status_badge};

/// Arguments for `hackathon status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Application ID or team name (case-insensitive).
    pub query: String,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StatusJson<'a> {
    message: &'static str,
    #[serde(flatten)]
    lookup: StatusLookup<'a>,
}

impl StatusArgs {
    pub fn run(self, data_dir: Option<PathBuf>) -> Result<()> {
        let registry = super::open_registry(data_dir)?;
        let lookup = registry
            .find_status(&self.query)
            .with_context(|| format!("no status for '{}'", self.query.trim()))?;

        if self.json {
            let payload = StatusJson {
                message: headline(lookup.application.status),
                lookup,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
            );
            return Ok(());
        }

        print_lookup(&lookup);
        Ok(())
    }
}

fn headline(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Selected => "CONGRATULATIONS! You have been SELECTED!",
        ApplicationStatus::Rejected => "Unfortunately, your application was not selected this time.",
        ApplicationStatus::Pending => "Your application is under review. We will notify you soon.",
    }
}

fn print_lookup(lookup: &StatusLookup<'_>) {
    let app = lookup.application;
    let message = headline(app.status);
    let message = match app.status {
        ApplicationStatus::Selected => format!("🎉 {}", message.green().bold()),
        ApplicationStatus::Rejected => format!("❌ {}", message.red()),
        ApplicationStatus::Pending => format!("⏳ {}", message.yellow()),
    };
    println!("{message}");
    println!();

    println!("{}", "Application Details".bold());
    println!("  Application ID:   {}", app.id);
    println!("  Team Name:        {}", app.team_name);
    println!("  Team Lead:        {} ({})", app.team_lead_name, app.team_lead_email);
    println!("  Team Members:     {}", app.members.len());
    println!("  Experience Level: {}", capitalize(&app.experience));
    println!("  Status:           {}", status_badge(app.status));
    println!("  Submitted:        {}", app.submitted_at.format("%Y-%m-%d"));
    println!();

    match lookup.project {
        Some(project) => {
            println!("{}", "Project Details".bold());
            println!("  Project Name: {}", project.project_name);
            println!("  Theme:        {}", capitalize(&project.project_theme));
            println!("  Tech Stack:   {}", project.tech_stack);
            println!("  Description:  {}", project.description);
            if let Some(link) = project.project_link.as_deref().filter(|l| !l.is_empty()) {
                println!("  Link:         {link}");
            }
        }
        None => println!(
            "⚠️  No project submitted yet. Run `hackathon submit {}` with your project details.",
            app.id
        ),
    }
}
