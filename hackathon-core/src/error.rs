//! Error types for hackathon-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ApplicationId;

/// Failures of the snapshot store backing a registry.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O failure reading or writing a slot, with the path involved.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error (save path).
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience constructor for [`StoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.into(),
        source,
    }
}

/// All errors that can arise from registry operations.
///
/// The first group are validation outcomes: deterministic, user-correctable,
/// and always reported before anything is mutated.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("team name must not be empty")]
    EmptyTeamName,

    #[error("at least 2 team members are required (got {count})")]
    TooFewMembers { count: usize },

    #[error("at most 4 team members are allowed (got {count})")]
    TooManyMembers { count: usize },

    #[error("team name '{team_name}' already exists; choose a different name")]
    DuplicateTeamName { team_name: String },

    #[error("'{email}' has already applied with another team")]
    DuplicateEmail { email: String },

    /// No application matched an identifier or team-name query.
    #[error("application '{query}' not found; check the application ID or team name")]
    ApplicationNotFound { query: String },

    #[error("a project has already been submitted for application {id}")]
    ProjectAlreadySubmitted { id: ApplicationId },

    #[error("enter an application ID or team name")]
    EmptyQuery,

    /// The id generator kept returning identifiers that are already taken.
    #[error("could not generate a unique application id (last attempt: {id})")]
    IdCollision { id: ApplicationId },

    /// The snapshot store failed to read or write.
    #[error("snapshot store error: {0}")]
    Store(#[from] StoreError),

    /// Config YAML parse error, with the file path.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.hackathon/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

impl RegistryError {
    /// `true` for outcomes caused by the caller's input rather than the
    /// environment (store, config, home directory).
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            RegistryError::Store(_)
                | RegistryError::Parse { .. }
                | RegistryError::HomeNotFound
                | RegistryError::IdCollision { .. }
        )
    }
}
