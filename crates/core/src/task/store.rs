//! Task store backed by the local task database
//!
//! The store opens its database lazily on first use and hands every
//! operation a shared connection. Wiping the database moves the store into
//! a wiped state in which every operation fails until it is reopened.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::database::{self, Database, IndexKey};
use super::model::{sort_tasks, NewTask, Task, TaskPriority, TaskStatus};
use super::repository::TaskRepository;
use crate::{Error, Result};

/// Connection slot of a [`TaskStore`]
#[derive(Debug)]
enum Connection {
    /// Not opened yet; the next operation opens it
    Closed,
    Open(Arc<Database>),
    /// Destroyed; only an explicit `open` brings it back
    Wiped,
}

/// Task store persisting to `<data_dir>/<name>.json`
#[derive(Debug)]
pub struct TaskStore {
    data_dir: PathBuf,
    name: String,
    connection: Mutex<Connection>,
}

impl TaskStore {
    /// Create a new TaskStore
    ///
    /// Nothing touches the disk until the first operation or `open`.
    pub fn new(data_dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            name: name.into(),
            connection: Mutex::new(Connection::Closed),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the database file
    pub fn path(&self) -> PathBuf {
        Database::path_for(&self.data_dir, &self.name)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Open the database, creating it if needed
    ///
    /// Idempotent: while a connection is open every caller gets the same
    /// handle. After a wipe this recreates the database empty.
    pub async fn open(&self) -> Result<Arc<Database>> {
        let mut connection = self.connection.lock().await;
        if let Connection::Open(db) = &*connection {
            if !db.is_closed() {
                return Ok(Arc::clone(db));
            }
        }
        self.connect(&mut connection).await
    }

    async fn connect(&self, connection: &mut Connection) -> Result<Arc<Database>> {
        let db = Arc::new(Database::open(&self.data_dir, &self.name).await?);
        *connection = Connection::Open(Arc::clone(&db));
        Ok(db)
    }

    /// Connection for a single operation, opening lazily
    async fn database(&self) -> Result<Arc<Database>> {
        let mut connection = self.connection.lock().await;
        match &*connection {
            Connection::Open(db) => return Ok(Arc::clone(db)),
            Connection::Wiped => {
                return Err(Error::DatabaseWiped {
                    name: self.name.clone(),
                })
            }
            Connection::Closed => {}
        }
        self.connect(&mut connection).await
    }

    async fn find(&self, key: IndexKey) -> Result<Vec<Task>> {
        let db = self.database().await?;
        let mut tasks = db.read(move |c| c.get_by_index(key)).await?;
        sort_tasks(&mut tasks);
        Ok(tasks)
    }
}

#[async_trait]
impl TaskRepository for TaskStore {
    async fn add_task(&self, request: NewTask) -> Result<Task> {
        let db = self.database().await?;
        let task = db
            .write(move |c| {
                let id = c.next_id();
                let task = Task::new(id, request, c.next_created_at());
                c.add(task.clone())?;
                Ok(task)
            })
            .await?;
        debug!("Added task {} [{}]", task.id, task.priority);
        Ok(task)
    }

    async fn get_all_tasks(&self) -> Result<Vec<Task>> {
        let db = self.database().await?;
        let mut tasks = db.read(|c| Ok(c.get_all())).await?;
        sort_tasks(&mut tasks);
        Ok(tasks)
    }

    async fn get_tasks_by_priority(&self, priority: TaskPriority) -> Result<Vec<Task>> {
        self.find(IndexKey::Priority(priority)).await
    }

    async fn get_tasks_by_status(&self, status: TaskStatus) -> Result<Vec<Task>> {
        self.find(IndexKey::Status(status)).await
    }

    async fn get_task_by_id(&self, id: &str) -> Result<Option<Task>> {
        let db = self.database().await?;
        db.read(|c| Ok(c.get(id).cloned())).await
    }

    async fn delete_task(&self, id: &str) -> Result<bool> {
        let db = self.database().await?;
        let removed = db.write(|c| Ok(c.delete(id).is_some())).await?;
        debug!("Delete task {}: removed={}", id, removed);
        Ok(removed)
    }

    async fn mark_done(&self, id: &str) -> Result<Option<Task>> {
        let db = self.database().await?;
        db.write(|c| {
            let Some(mut task) = c.get(id).cloned() else {
                return Ok(None);
            };
            if task.status != TaskStatus::Done {
                task.status = TaskStatus::Done;
                c.put(task.clone());
                debug!("Marked task {} as done", id);
            }
            Ok(Some(task))
        })
        .await
    }

    async fn clear_all(&self) -> Result<usize> {
        let db = self.database().await?;
        let removed = db.write(|c| Ok(c.clear())).await?;
        info!("Cleared {} task(s) from '{}'", removed, self.name);
        Ok(removed)
    }

    async fn wipe(&self) -> Result<()> {
        let mut connection = self.connection.lock().await;

        if let Connection::Open(db) = &*connection {
            let others = Arc::strong_count(db) - 1;
            if others > 0 {
                warn!(
                    "Refusing to wipe '{}': {} other connection(s) still open",
                    self.name, others
                );
                return Err(Error::DeletionBlocked {
                    name: self.name.clone(),
                    connections: others,
                });
            }
            db.close();
        }

        database::destroy(&self.path()).await?;
        *connection = Connection::Wiped;
        info!("Wiped database '{}'", self.name);
        Ok(())
    }
}
