//! `hackathon list` — admin view of all applications.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use hackathon_core::{Application, ApplicationStatus};

use super::super::StatusArg;

/// Arguments for `hackathon list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show applications with this status: pending | selected | rejected.
    #[arg(long, value_name = "STATUS")]
    pub status: Option<StatusArg>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListEntryJson<'a> {
    #[serde(flatten)]
    application: &'a Application,
    has_project: bool,
}

#[derive(Tabled)]
struct ListTableRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "team")]
    team: String,
    #[tabled(rename = "lead")]
    lead: String,
    #[tabled(rename = "members")]
    members: usize,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "project")]
    project: String,
}

impl ListArgs {
    pub fn run(self, data_dir: Option<PathBuf>) -> Result<()> {
        let registry = super::open_registry(data_dir)?;
        let filter: Option<ApplicationStatus> = self.status.map(Into::into);
        let rows: Vec<(&Application, bool)> = registry
            .applications()
            .iter()
            .filter(|app| filter.map_or(true, |status| app.status == status))
            .map(|app| (app, registry.project_for(&app.id).is_some()))
            .collect();

        if self.json {
            let payload: Vec<ListEntryJson<'_>> = rows
                .into_iter()
                .map(|(application, has_project)| ListEntryJson {
                    application,
                    has_project,
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize list JSON")?
            );
            return Ok(());
        }

        if rows.is_empty() {
            println!("No applications found.");
            return Ok(());
        }

        let table_rows: Vec<ListTableRow> = rows
            .into_iter()
            .map(|(app, has_project)| ListTableRow {
                id: app.id.to_string(),
                team: app.team_name.clone(),
                lead: app.team_lead_email.clone(),
                members: app.members.len(),
                status: app.status.to_string(),
                project: if has_project { "submitted" } else { "-" }.to_string(),
            })
            .collect();
        let mut table = Table::new(table_rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
