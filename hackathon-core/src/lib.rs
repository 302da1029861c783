//! Hackathon registry core — domain types, registry operations, snapshot
//! persistence, errors.
//!
//! - [`types`] — newtypes, records and inputs
//! - [`error`] — [`RegistryError`], [`StoreError`]
//! - [`registry`] — [`Registry`]: create / submit / find / select / reject / stats
//! - [`store`] — [`SnapshotStore`] with in-memory and file-backed stores
//! - [`ids`] — injectable application id generation
//! - [`config`] — optional `~/.hackathon/config.yaml`

pub mod config;
pub mod error;
pub mod ids;
pub mod registry;
pub mod store;
pub mod types;

pub use config::Config;
pub use error::{RegistryError, StoreError};
pub use ids::{IdGenerator, SequentialIdGenerator, TimestampIdGenerator};
pub use registry::{Registry, MAX_MEMBERS, MIN_MEMBERS};
pub use store::{FileStore, MemoryStore, Slot, SnapshotStore};
pub use types::{
    Application, ApplicationId, ApplicationStatus, Member, NewApplication, NewProject, Project,
    Stats, StatusLookup,
};
