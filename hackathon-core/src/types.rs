//! Domain types for the hackathon registry.
//!
//! Stored types serialize with camelCase field names so a snapshot written by
//! the browser tool (`teamName`, `teamLeadEmail`, `submittedAt`, …) loads
//! unchanged.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed application identifier (e.g. `APP-LZ3K9Q1A-7F2QX`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ApplicationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ApplicationId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Selection status of an application.
///
/// `Pending` is only ever the initial value: the registry offers transitions
/// to `Selected` and `Rejected` (and between those two) but none back to
/// `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Selected,
    Rejected,
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationStatus::Pending => write!(f, "pending"),
            ApplicationStatus::Selected => write!(f, "selected"),
            ApplicationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

// ---------------------------------------------------------------------------
// Stored records
// ---------------------------------------------------------------------------

/// A team member listed on an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub email: String,
}

impl Member {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// A team's registration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub team_name: String,
    pub team_lead_name: String,
    /// Always lower-cased.
    pub team_lead_email: String,
    pub team_lead_phone: String,
    /// Between 2 and 4 entries; emails lower-cased.
    pub members: Vec<Member>,
    pub experience: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
}

impl Application {
    /// Lead email followed by member emails, in application order.
    pub fn emails(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.team_lead_email.as_str())
            .chain(self.members.iter().map(|m| m.email.as_str()))
    }
}

/// The project a team submitted against its application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub application_id: ApplicationId,
    /// Copy of the application's team name at submission time.
    pub team_name: String,
    pub project_name: String,
    pub project_theme: String,
    pub description: String,
    pub tech_stack: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_link: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Raw input for [`Registry::create_application`](crate::Registry::create_application).
///
/// Values are normalized by the registry (trimmed, emails lower-cased,
/// incomplete members dropped), so callers may pass form input as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewApplication {
    pub team_name: String,
    pub team_lead_name: String,
    pub team_lead_email: String,
    pub team_lead_phone: String,
    pub members: Vec<Member>,
    pub experience: String,
}

/// Raw input for [`Registry::submit_project`](crate::Registry::submit_project).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProject {
    pub application_id: String,
    pub project_name: String,
    pub project_theme: String,
    pub description: String,
    pub tech_stack: String,
    pub project_link: Option<String>,
}

// ---------------------------------------------------------------------------
// Read models
// ---------------------------------------------------------------------------

/// Summary counters shown on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_applications: usize,
    pub total_projects: usize,
    /// Applications whose status is `selected`.
    pub total_selected: usize,
}

/// Result of a status query: the application and its project, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusLookup<'a> {
    pub application: &'a Application,
    pub project: Option<&'a Project>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_application() -> Application {
        Application {
            id: ApplicationId::from("APP-1"),
            team_name: "Orion".to_string(),
            team_lead_name: "Ada".to_string(),
            team_lead_email: "ada@x.com".to_string(),
            team_lead_phone: "555-0100".to_string(),
            members: vec![Member::new("B", "b@x.com"), Member::new("C", "c@x.com")],
            experience: "beginner".to_string(),
            status: ApplicationStatus::Pending,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn application_id_display() {
        assert_eq!(ApplicationId::from("APP-1").to_string(), "APP-1");
        assert_eq!(ApplicationId::from(String::from("x")).as_str(), "x");
    }

    #[test]
    fn status_display_and_default() {
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Pending);
        assert_eq!(ApplicationStatus::Selected.to_string(), "selected");
        assert_eq!(ApplicationStatus::Rejected.to_string(), "rejected");
    }

    #[test]
    fn application_uses_camel_case_on_the_wire() {
        let json = serde_json::to_value(sample_application()).expect("serialize");
        assert_eq!(json["teamName"], "Orion");
        assert_eq!(json["teamLeadEmail"], "ada@x.com");
        assert_eq!(json["status"], "pending");
        assert!(json.get("submittedAt").is_some());
    }

    #[test]
    fn emails_lists_lead_then_members() {
        let app = sample_application();
        let emails: Vec<&str> = app.emails().collect();
        assert_eq!(emails, vec!["ada@x.com", "b@x.com", "c@x.com"]);
    }

    #[test]
    fn project_without_link_omits_field() {
        let project = Project {
            application_id: ApplicationId::from("APP-1"),
            team_name: "Orion".to_string(),
            project_name: "Star Map".to_string(),
            project_theme: "space".to_string(),
            description: "maps".to_string(),
            tech_stack: "rust".to_string(),
            project_link: None,
            submitted_at: Utc::now(),
        };
        let json = serde_json::to_value(&project).expect("serialize");
        assert!(json.get("projectLink").is_none());
        assert_eq!(json["applicationId"], "APP-1");
    }
}
