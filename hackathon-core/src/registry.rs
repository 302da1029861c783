//! The application/project registry.
//!
//! # Operation pattern
//!
//! Every mutating operation runs validate → mutate → persist:
//! - all checks happen before anything is touched, so a validation error
//!   leaves the registry exactly as it was;
//! - after the in-memory change the full snapshot is written to the store;
//!   if that write fails the in-memory change is undone, the previous
//!   snapshot is written back over any slots already replaced, and the
//!   store error is returned.
//!
//! Stats are derived on read; after each successful mutation they are
//! logged at debug level.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::error::{RegistryError, StoreError};
use crate::ids::{IdGenerator, TimestampIdGenerator};
use crate::store::{Slot, SnapshotStore};
use crate::types::{
    Application, ApplicationId, ApplicationStatus, Member, NewApplication, NewProject, Project,
    Stats, StatusLookup,
};

pub const MIN_MEMBERS: usize = 2;
pub const MAX_MEMBERS: usize = 4;

/// How many times a colliding id is re-drawn before giving up.
const MAX_ID_ATTEMPTS: usize = 8;

/// Owns the applications, projects and selected-list, plus the store they
/// are persisted to.
#[derive(Debug)]
pub struct Registry<S, G = TimestampIdGenerator> {
    store: S,
    ids: G,
    applications: Vec<Application>,
    projects: Vec<Project>,
    /// Ids passed to `select_team`, in call order. Redundant with
    /// `Application::status`; repeated selects append repeatedly.
    selected: Vec<ApplicationId>,
}

// ---------------------------------------------------------------------------
// 1. Construction
// ---------------------------------------------------------------------------

impl<S: SnapshotStore> Registry<S> {
    /// Empty registry with the default id generator. Does not read `store`.
    pub fn new(store: S) -> Self {
        Self::with_id_generator(store, TimestampIdGenerator)
    }

    /// Registry restored from `store` with the default id generator.
    pub fn open(store: S) -> Result<Self, RegistryError> {
        Self::open_with(store, TimestampIdGenerator)
    }
}

impl<S: SnapshotStore, G: IdGenerator> Registry<S, G> {
    /// Empty registry drawing ids from `ids`. Does not read `store`.
    pub fn with_id_generator(store: S, ids: G) -> Self {
        Self {
            store,
            ids,
            applications: Vec::new(),
            projects: Vec::new(),
            selected: Vec::new(),
        }
    }

    /// Registry restored from `store`, drawing ids from `ids`.
    pub fn open_with(store: S, ids: G) -> Result<Self, RegistryError> {
        let mut registry = Self::with_id_generator(store, ids);
        registry.load()?;
        Ok(registry)
    }

    // -----------------------------------------------------------------------
    // 2. Applications
    // -----------------------------------------------------------------------

    /// Register a team.
    ///
    /// Input is normalized first: strings are trimmed, emails lower-cased,
    /// and members missing a name or email are dropped before counting.
    pub fn create_application(
        &mut self,
        input: NewApplication,
    ) -> Result<Application, RegistryError> {
        let input = normalize_application(input);
        self.validate_application(&input)?;

        let now = Utc::now();
        let id = self.fresh_id(now)?;
        let application = Application {
            id,
            team_name: input.team_name,
            team_lead_name: input.team_lead_name,
            team_lead_email: input.team_lead_email,
            team_lead_phone: input.team_lead_phone,
            members: input.members,
            experience: input.experience,
            status: ApplicationStatus::Pending,
            submitted_at: now,
        };

        self.applications.push(application.clone());
        self.persist_or_undo(|registry| {
            registry.applications.pop();
        })?;
        tracing::info!(id = %application.id, team = %application.team_name, "application created");
        Ok(application)
    }

    fn validate_application(&self, input: &NewApplication) -> Result<(), RegistryError> {
        if input.team_name.is_empty() {
            return Err(RegistryError::EmptyTeamName);
        }

        let count = input.members.len();
        if count < MIN_MEMBERS {
            return Err(RegistryError::TooFewMembers { count });
        }
        if count > MAX_MEMBERS {
            return Err(RegistryError::TooManyMembers { count });
        }

        let team_key = input.team_name.to_lowercase();
        if self
            .applications
            .iter()
            .any(|app| app.team_name.to_lowercase() == team_key)
        {
            return Err(RegistryError::DuplicateTeamName {
                team_name: input.team_name.clone(),
            });
        }

        let taken: HashSet<String> = self
            .applications
            .iter()
            .flat_map(|app| app.emails())
            .map(str::to_lowercase)
            .collect();
        let requested = std::iter::once(input.team_lead_email.as_str())
            .chain(input.members.iter().map(|m| m.email.as_str()));
        for email in requested.filter(|e| !e.is_empty()) {
            if taken.contains(email) {
                return Err(RegistryError::DuplicateEmail {
                    email: email.to_string(),
                });
            }
        }
        Ok(())
    }

    fn fresh_id(&mut self, now: DateTime<Utc>) -> Result<ApplicationId, RegistryError> {
        let mut id = self.ids.next_id(now);
        for _ in 1..MAX_ID_ATTEMPTS {
            if self.application(id.as_str()).is_none() {
                return Ok(id);
            }
            tracing::debug!(id = %id, "generated id already in use; drawing again");
            id = self.ids.next_id(now);
        }
        if self.application(id.as_str()).is_none() {
            return Ok(id);
        }
        Err(RegistryError::IdCollision { id })
    }

    // -----------------------------------------------------------------------
    // 3. Projects
    // -----------------------------------------------------------------------

    /// Submit the project for an application. One project per application.
    pub fn submit_project(&mut self, input: NewProject) -> Result<Project, RegistryError> {
        let application_id = input.application_id.trim();
        let team_name = self
            .application(application_id)
            .map(|app| app.team_name.clone())
            .ok_or_else(|| RegistryError::ApplicationNotFound {
                query: application_id.to_string(),
            })?;
        let application_id = ApplicationId::from(application_id);

        if self.project_for(&application_id).is_some() {
            return Err(RegistryError::ProjectAlreadySubmitted { id: application_id });
        }

        let project = Project {
            application_id,
            team_name,
            project_name: input.project_name.trim().to_string(),
            project_theme: input.project_theme.trim().to_string(),
            description: input.description.trim().to_string(),
            tech_stack: input.tech_stack.trim().to_string(),
            project_link: input
                .project_link
                .map(|link| link.trim().to_string())
                .filter(|link| !link.is_empty()),
            submitted_at: Utc::now(),
        };

        self.projects.push(project.clone());
        self.persist_or_undo(|registry| {
            registry.projects.pop();
        })?;
        tracing::info!(id = %project.application_id, project = %project.project_name, "project submitted");
        Ok(project)
    }

    // -----------------------------------------------------------------------
    // 4. Lookup
    // -----------------------------------------------------------------------

    /// Find an application by id or team name, both case-insensitive.
    ///
    /// Applications are scanned in registration order and the first one
    /// matching either way wins. With the uniqueness invariants intact at
    /// most one can match.
    pub fn find_status(&self, query: &str) -> Result<StatusLookup<'_>, RegistryError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RegistryError::EmptyQuery);
        }

        let id_key = query.to_uppercase();
        let team_key = query.to_lowercase();
        let application = self
            .applications
            .iter()
            .find(|app| {
                app.id.as_str().to_uppercase() == id_key
                    || app.team_name.to_lowercase() == team_key
            })
            .ok_or_else(|| RegistryError::ApplicationNotFound {
                query: query.to_string(),
            })?;

        Ok(StatusLookup {
            application,
            project: self.project_for(&application.id),
        })
    }

    /// Application with exactly this id.
    pub fn application(&self, id: &str) -> Option<&Application> {
        self.applications.iter().find(|app| app.id.as_str() == id)
    }

    /// Project submitted for `id`, if any.
    pub fn project_for(&self, id: &ApplicationId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.application_id == id)
    }

    // -----------------------------------------------------------------------
    // 5. Review
    // -----------------------------------------------------------------------

    /// Mark an application selected and append it to the selected-list.
    ///
    /// The append is unconditional: selecting twice logs the id twice.
    pub fn select_team(&mut self, id: &str) -> Result<(), RegistryError> {
        self.transition(id, ApplicationStatus::Selected)
    }

    /// Mark an application rejected. The selected-list is left as is.
    pub fn reject_team(&mut self, id: &str) -> Result<(), RegistryError> {
        self.transition(id, ApplicationStatus::Rejected)
    }

    fn transition(&mut self, id: &str, status: ApplicationStatus) -> Result<(), RegistryError> {
        let index = self
            .applications
            .iter()
            .position(|app| app.id.as_str() == id)
            .ok_or_else(|| RegistryError::ApplicationNotFound {
                query: id.to_string(),
            })?;

        let previous = std::mem::replace(&mut self.applications[index].status, status);
        let logged = status == ApplicationStatus::Selected;
        if logged {
            let id = self.applications[index].id.clone();
            self.selected.push(id);
        }

        self.persist_or_undo(|registry| {
            registry.applications[index].status = previous;
            if logged {
                registry.selected.pop();
            }
        })?;
        tracing::info!(id = %id, from = %previous, to = %status, "application status changed");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // 6. Reads
    // -----------------------------------------------------------------------

    pub fn stats(&self) -> Stats {
        Stats {
            total_applications: self.applications.len(),
            total_projects: self.projects.len(),
            total_selected: self
                .applications
                .iter()
                .filter(|app| app.status == ApplicationStatus::Selected)
                .count(),
        }
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn selected(&self) -> &[ApplicationId] {
        &self.selected
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // -----------------------------------------------------------------------
    // 7. Persistence
    // -----------------------------------------------------------------------

    /// Write all three collections to the store, replacing prior contents.
    ///
    /// Payloads are serialized before the first write, so a serialization
    /// error writes nothing.
    pub fn save(&mut self) -> Result<(), RegistryError> {
        let applications = serde_json::to_string(&self.applications).map_err(StoreError::from)?;
        let projects = serde_json::to_string(&self.projects).map_err(StoreError::from)?;
        let selected = serde_json::to_string(&self.selected).map_err(StoreError::from)?;

        self.store.write(Slot::Applications, &applications)?;
        self.store.write(Slot::Projects, &projects)?;
        self.store.write(Slot::Selected, &selected)?;
        Ok(())
    }

    /// Replace each collection with its stored slot.
    ///
    /// A missing slot leaves the collection as is; so does a slot that fails
    /// to parse (logged as a warning). Only store read failures are errors.
    pub fn load(&mut self) -> Result<(), RegistryError> {
        if let Some(applications) = self.read_slot(Slot::Applications)? {
            self.applications = applications;
        }
        if let Some(projects) = self.read_slot(Slot::Projects)? {
            self.projects = projects;
        }
        if let Some(selected) = self.read_slot(Slot::Selected)? {
            self.selected = selected;
        }
        tracing::debug!(stats = ?self.stats(), "registry loaded");
        Ok(())
    }

    fn read_slot<T: DeserializeOwned>(&self, slot: Slot) -> Result<Option<T>, RegistryError> {
        let Some(raw) = self.store.read(slot)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                tracing::warn!(%slot, error = %err, "ignoring unreadable snapshot slot");
                Ok(None)
            }
        }
    }

    fn persist_or_undo(&mut self, undo: impl FnOnce(&mut Self)) -> Result<(), RegistryError> {
        match self.save() {
            Ok(()) => {
                tracing::debug!(stats = ?self.stats(), "registry updated");
                Ok(())
            }
            Err(err) => {
                undo(self);
                // Slots written before the failure still hold the undone change;
                // write the restored collections back over them.
                if let Err(restore) = self.save() {
                    tracing::warn!(error = %restore, "could not restore snapshot after failed save");
                }
                Err(err)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn normalize_application(input: NewApplication) -> NewApplication {
    NewApplication {
        team_name: input.team_name.trim().to_string(),
        team_lead_name: input.team_lead_name.trim().to_string(),
        team_lead_email: input.team_lead_email.trim().to_lowercase(),
        team_lead_phone: input.team_lead_phone.trim().to_string(),
        members: input
            .members
            .into_iter()
            .map(|m| Member::new(m.name.trim(), m.email.trim().to_lowercase()))
            .filter(|m| !m.name.is_empty() && !m.email.is_empty())
            .collect(),
        experience: input.experience.trim().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
