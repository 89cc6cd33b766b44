//! Versioned, transactional task database
//!
//! Each database is a single JSON document on disk holding the version,
//! the id sequence, the declared secondary indexes and the task records.
//! Index contents live in memory and are rebuilt from the records on open.
//!
//! Writes run against a working copy of the collection. The copy is
//! committed by writing a sibling temp file and renaming it over the
//! database file; only then does it replace the in-memory state. If the
//! transaction body or the commit fails, the copy is dropped and nothing
//! changes.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::model::{Task, TaskPriority, TaskStatus};
use crate::{Error, Result};

/// Current schema version
pub const DB_VERSION: u32 = 1;

/// Name of the secondary index over task priority
pub const PRIORITY_INDEX: &str = "priority";

/// Name of the secondary index over task status
pub const STATUS_INDEX: &str = "status";

/// A lookup key into one of the secondary indexes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKey {
    Priority(TaskPriority),
    Status(TaskStatus),
}

impl IndexKey {
    pub fn index_name(&self) -> &'static str {
        match self {
            Self::Priority(_) => PRIORITY_INDEX,
            Self::Status(_) => STATUS_INDEX,
        }
    }
}

/// On-disk layout of a database
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatabaseFile {
    name: String,
    version: u32,
    #[serde(default)]
    next_sequence: u64,
    #[serde(default)]
    indexes: BTreeSet<String>,
    #[serde(default)]
    tasks: BTreeMap<String, Task>,
}

/// The task collection as seen from inside a transaction
#[derive(Debug, Clone, Default)]
pub struct Collection {
    next_sequence: u64,
    indexes: BTreeSet<String>,
    records: BTreeMap<String, Task>,
    by_priority: BTreeMap<TaskPriority, BTreeSet<String>>,
    by_status: BTreeMap<TaskStatus, BTreeSet<String>>,
    dirty: bool,
}

impl Collection {
    fn from_file(file: DatabaseFile) -> Self {
        let mut collection = Self {
            next_sequence: file.next_sequence,
            indexes: file.indexes,
            ..Self::default()
        };
        for task in file.tasks.into_values() {
            // The sequence never falls behind an id already on disk
            if let Some(sequence) = id_sequence(&task.id) {
                collection.next_sequence = collection.next_sequence.max(sequence);
            }
            collection.index_insert(&task);
            collection.records.insert(task.id.clone(), task);
        }
        collection
    }

    fn to_file(&self, name: &str, version: u32) -> DatabaseFile {
        DatabaseFile {
            name: name.to_string(),
            version,
            next_sequence: self.next_sequence,
            indexes: self.indexes.clone(),
            tasks: self.records.clone(),
        }
    }

    /// Declare an index; returns false if it already existed
    fn ensure_index(&mut self, name: &str) -> bool {
        let created = self.indexes.insert(name.to_string());
        self.dirty |= created;
        created
    }

    fn index_insert(&mut self, task: &Task) {
        self.by_priority
            .entry(task.priority)
            .or_default()
            .insert(task.id.clone());
        self.by_status
            .entry(task.status)
            .or_default()
            .insert(task.id.clone());
    }

    fn index_remove(&mut self, task: &Task) {
        if let Some(ids) = self.by_priority.get_mut(&task.priority) {
            ids.remove(&task.id);
        }
        if let Some(ids) = self.by_status.get_mut(&task.status) {
            ids.remove(&task.id);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_index(&self, name: &str) -> bool {
        self.indexes.contains(name)
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.records.get(id)
    }

    /// Every record, in key order
    pub fn get_all(&self) -> Vec<Task> {
        self.records.values().cloned().collect()
    }

    /// Records matching an index key, without scanning the collection
    pub fn get_by_index(&self, key: IndexKey) -> Result<Vec<Task>> {
        if !self.has_index(key.index_name()) {
            return Err(Error::Storage(format!(
                "Index '{}' does not exist",
                key.index_name()
            )));
        }

        let ids = match key {
            IndexKey::Priority(priority) => self.by_priority.get(&priority),
            IndexKey::Status(status) => self.by_status.get(&status),
        };

        Ok(ids
            .into_iter()
            .flatten()
            .filter_map(|id| self.records.get(id).cloned())
            .collect())
    }

    /// Allocate the next task id from the persisted sequence
    pub fn next_id(&mut self) -> String {
        self.next_sequence += 1;
        self.dirty = true;
        format!("tsk-{:03}", self.next_sequence)
    }

    /// A creation time strictly later than every stored record's
    pub fn next_created_at(&self) -> DateTime<Utc> {
        let now = Utc::now();
        match self.records.values().map(|t| t.created_at).max() {
            Some(latest) if latest >= now => latest + Duration::microseconds(1),
            _ => now,
        }
    }

    /// Insert a new record; fails if the id is taken
    pub fn add(&mut self, task: Task) -> Result<()> {
        if self.records.contains_key(&task.id) {
            return Err(Error::DuplicateTask { id: task.id });
        }
        self.index_insert(&task);
        self.records.insert(task.id.clone(), task);
        self.dirty = true;
        Ok(())
    }

    /// Insert or replace a record
    pub fn put(&mut self, task: Task) {
        if let Some(previous) = self.records.remove(&task.id) {
            self.index_remove(&previous);
        }
        self.index_insert(&task);
        self.records.insert(task.id.clone(), task);
        self.dirty = true;
    }

    pub fn delete(&mut self, id: &str) -> Option<Task> {
        let removed = self.records.remove(id)?;
        self.index_remove(&removed);
        self.dirty = true;
        Some(removed)
    }

    /// Remove every record; index declarations and the id sequence remain
    pub fn clear(&mut self) -> usize {
        let removed = self.records.len();
        if removed > 0 {
            self.records.clear();
            self.by_priority.clear();
            self.by_status.clear();
            self.dirty = true;
        }
        removed
    }
}

/// Handle to an open task database
#[derive(Debug)]
pub struct Database {
    name: String,
    path: PathBuf,
    version: u32,
    collection: RwLock<Collection>,
    closed: AtomicBool,
}

impl Database {
    /// Location of the database file for `name` inside `data_dir`
    pub fn path_for(data_dir: &Path, name: &str) -> PathBuf {
        data_dir.join(format!("{}.json", name))
    }

    /// Open the named database, creating or upgrading it as needed
    pub async fn open(data_dir: impl AsRef<Path>, name: &str) -> Result<Self> {
        let path = Self::path_for(data_dir.as_ref(), name);

        let (found_version, mut collection) = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            let file: DatabaseFile = serde_json::from_str(&content).map_err(|e| {
                Error::Storage(format!(
                    "Failed to parse database file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            (file.version, Collection::from_file(file))
        } else {
            (0, Collection::default())
        };

        if found_version > DB_VERSION {
            return Err(Error::VersionMismatch {
                name: name.to_string(),
                found: found_version,
                supported: DB_VERSION,
            });
        }

        if found_version < DB_VERSION {
            for index in [PRIORITY_INDEX, STATUS_INDEX] {
                if collection.ensure_index(index) {
                    debug!("Created index '{}' on database '{}'", index, name);
                }
            }
            commit(&path, &collection.to_file(name, DB_VERSION)).await?;
            collection.dirty = false;
            info!(
                "Upgraded database '{}' from version {} to {}",
                name, found_version, DB_VERSION
            );
        }

        info!("Opened database '{}' at {}", name, path.display());

        Ok(Self {
            name: name.to_string(),
            path,
            version: DB_VERSION,
            collection: RwLock::new(collection),
            closed: AtomicBool::new(false),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Reject every further transaction on this handle
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(Error::DatabaseClosed {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Run a read-only transaction
    pub async fn read<T, F>(&self, body: F) -> Result<T>
    where
        F: FnOnce(&Collection) -> Result<T> + Send,
        T: Send,
    {
        self.ensure_open()?;
        let collection = self.collection.read().await;
        self.ensure_open()?;
        body(&*collection)
    }

    /// Run a read-write transaction
    ///
    /// The body sees a private copy of the collection. Its changes become
    /// visible only after they have been written to disk.
    pub async fn write<T, F>(&self, body: F) -> Result<T>
    where
        F: FnOnce(&mut Collection) -> Result<T> + Send,
        T: Send,
    {
        self.ensure_open()?;
        let mut committed = self.collection.write().await;
        self.ensure_open()?;

        let mut working = committed.clone();
        working.dirty = false;
        let value = body(&mut working)?;

        if working.dirty {
            commit(&self.path, &working.to_file(&self.name, self.version)).await?;
            working.dirty = false;
            *committed = working;
        }

        Ok(value)
    }
}

/// Numeric part of a `tsk-N` id
fn id_sequence(id: &str) -> Option<u64> {
    id.strip_prefix("tsk-")?.parse().ok()
}

/// Atomically replace the database file with `file`
async fn commit(path: &Path, file: &DatabaseFile) -> Result<()> {
    let content = serde_json::to_string_pretty(file)?;

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let staging = staging_path(path);
    tokio::fs::write(&staging, content).await?;
    tokio::fs::rename(&staging, path).await?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    PathBuf::from(staging)
}

/// Remove a database file and any leftover staging file
pub(crate) async fn destroy(path: &Path) -> Result<()> {
    for target in [path.to_path_buf(), staging_path(path)] {
        match tokio::fs::remove_file(&target).await {
            Ok(()) => debug!("Removed {}", target.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
