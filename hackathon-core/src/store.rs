//! Snapshot stores — where a registry's three collections live between runs.
//!
//! # Storage layout ([`FileStore`])
//!
//! ```text
//! ~/.hackathon/
//!   config.yaml                 (optional, see `config`)
//!   hackathon_applications.json (mode 0600)
//!   hackathon_projects.json     (mode 0600)
//!   hackathon_selected.json     (mode 0600)
//! ```
//!
//! Every slot is written wholesale with the `.tmp` + rename pattern, so a
//! crash mid-write leaves the previous snapshot intact.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{io_err, RegistryError, StoreError};

pub const DEFAULT_KEY_PREFIX: &str = "hackathon";

// ---------------------------------------------------------------------------
// 1. Slots and the store contract
// ---------------------------------------------------------------------------

/// One named slot of the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Applications,
    Projects,
    Selected,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Applications, Slot::Projects, Slot::Selected];

    pub fn key(self) -> &'static str {
        match self {
            Slot::Applications => "applications",
            Slot::Projects => "projects",
            Slot::Selected => "selected",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Key-value store holding one serialized payload per [`Slot`].
pub trait SnapshotStore {
    /// Return the slot's payload, or `None` if it was never written.
    fn read(&self, slot: Slot) -> Result<Option<String>, StoreError>;

    /// Replace the slot's payload.
    fn write(&mut self, slot: Slot, contents: &str) -> Result<(), StoreError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for &mut S {
    fn read(&self, slot: Slot) -> Result<Option<String>, StoreError> {
        (**self).read(slot)
    }

    fn write(&mut self, slot: Slot, contents: &str) -> Result<(), StoreError> {
        (**self).write(slot, contents)
    }
}

// ---------------------------------------------------------------------------
// 2. In-memory store
// ---------------------------------------------------------------------------

/// Process-local store. Cloning it snapshots the current contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    slots: HashMap<Slot, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw payload of `slot`, if written.
    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    /// Overwrite `slot` directly, bypassing any registry.
    pub fn insert(&mut self, slot: Slot, contents: impl Into<String>) {
        self.slots.insert(slot, contents.into());
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, slot: Slot) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(&slot).cloned())
    }

    fn write(&mut self, slot: Slot, contents: &str) -> Result<(), StoreError> {
        self.slots.insert(slot, contents.to_owned());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// 3. File store
// ---------------------------------------------------------------------------

/// One JSON file per slot under a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    dir: PathBuf,
    prefix: String,
}

impl FileStore {
    /// Store rooted at `dir` using the default `hackathon_` key prefix.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_prefix(dir, DEFAULT_KEY_PREFIX)
    }

    pub fn with_prefix(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    /// `<home>/.hackathon/` store.
    pub fn at_home(home: &Path) -> Self {
        Self::new(data_dir_at(home))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<prefix>_<slot>.json` — pure, no I/O.
    pub fn slot_path(&self, slot: Slot) -> PathBuf {
        self.dir.join(format!("{}_{}.json", self.prefix, slot.key()))
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(|e| io_err(&self.dir, e))?;
            set_dir_permissions(&self.dir)?;
        }
        Ok(())
    }
}

impl SnapshotStore for FileStore {
    fn read(&self, slot: Slot) -> Result<Option<String>, StoreError> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| io_err(&path, e))
    }

    /// Write flow: `.json.tmp` sibling → `chmod 0600` → `rename`.
    fn write(&mut self, slot: Slot, contents: &str) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let path = self.slot_path(slot);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, contents).map_err(|e| io_err(&tmp, e))?;
        set_file_permissions(&tmp)?;
        if let Err(e) = std::fs::rename(&tmp, &path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(&path, e));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// 4. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.hackathon/` — pure, no I/O.
pub fn data_dir_at(home: &Path) -> PathBuf {
    home.join(".hackathon")
}

/// The current user's home directory.
pub fn home() -> Result<PathBuf, RegistryError> {
    dirs::home_dir().ok_or(RegistryError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn slot_keys_match_browser_storage() {
        let keys: Vec<&str> = Slot::ALL.iter().map(|s| s.key()).collect();
        assert_eq!(keys, vec!["applications", "projects", "selected"]);
    }

    #[test]
    fn memory_store_missing_slot_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.read(Slot::Projects).unwrap(), None);
    }

    #[test]
    fn memory_store_overwrites() {
        let mut store = MemoryStore::new();
        store.write(Slot::Selected, "[\"a\"]").unwrap();
        store.write(Slot::Selected, "[]").unwrap();
        assert_eq!(store.get(Slot::Selected), Some("[]"));
    }

    #[test]
    fn slot_path_is_correct() {
        let home = TempDir::new().expect("tempdir");
        let store = FileStore::at_home(home.path());
        let path = store.slot_path(Slot::Applications);
        assert!(path.ends_with(".hackathon/hackathon_applications.json"));
    }

    #[test]
    fn file_store_missing_slot_is_none() {
        let home = TempDir::new().expect("tempdir");
        let store = FileStore::at_home(home.path());
        assert_eq!(store.read(Slot::Applications).unwrap(), None);
        assert!(!store.dir().exists(), "reads must not create the directory");
    }

    #[test]
    fn file_store_write_then_read() {
        let home = TempDir::new().expect("tempdir");
        let mut store = FileStore::with_prefix(home.path().join("data"), "spring");
        store.write(Slot::Projects, "[]").unwrap();
        assert_eq!(store.read(Slot::Projects).unwrap().as_deref(), Some("[]"));
        assert!(home.path().join("data/spring_projects.json").exists());
    }

    #[test]
    fn file_store_cleans_up_tmp() {
        let home = TempDir::new().expect("tempdir");
        let mut store = FileStore::at_home(home.path());
        store.write(Slot::Selected, "[]").unwrap();
        let tmp = store.slot_path(Slot::Selected).with_extension("json.tmp");
        assert!(!tmp.exists(), ".tmp must be gone after successful write");
    }

    #[test]
    fn failed_rename_removes_tmp() {
        let home = TempDir::new().expect("tempdir");
        let mut store = FileStore::at_home(home.path());
        let blocked = store.slot_path(Slot::Projects);
        std::fs::create_dir_all(blocked.join("occupied")).unwrap();

        let err = store.write(Slot::Projects, "[]").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }), "got: {err}");
        assert!(!blocked.with_extension("json.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn file_store_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let home = TempDir::new().expect("tempdir");
        let mut store = FileStore::at_home(home.path());
        store.write(Slot::Applications, "[]").unwrap();

        let dir_mode = std::fs::metadata(store.dir()).unwrap().permissions().mode() & 0o777;
        assert_eq!(dir_mode, 0o700);
        let file_mode = std::fs::metadata(store.slot_path(Slot::Applications))
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(file_mode, 0o600);
    }

    #[test]
    fn home_not_found_error_message() {
        assert!(RegistryError::HomeNotFound.to_string().contains("home directory"));
    }
}
