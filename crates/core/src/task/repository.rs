//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;

use super::model::{NewTask, Task, TaskPriority, TaskStatus};
use crate::Result;

/// Repository interface for task storage
///
/// Every listing comes back in listing order (see [`Task::listing_order`]).
/// Lookups and mutations of unknown ids are not errors.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a pending task with a fresh id
    async fn add_task(&self, task: NewTask) -> Result<Task>;

    /// Get all tasks
    async fn get_all_tasks(&self) -> Result<Vec<Task>>;

    /// Find tasks by priority
    async fn get_tasks_by_priority(&self, priority: TaskPriority) -> Result<Vec<Task>>;

    /// Find tasks by status
    async fn get_tasks_by_status(&self, status: TaskStatus) -> Result<Vec<Task>>;

    /// Get a task by ID
    async fn get_task_by_id(&self, id: &str) -> Result<Option<Task>>;

    /// Delete a task by ID; returns whether it existed
    async fn delete_task(&self, id: &str) -> Result<bool>;

    /// Mark a task done; returns the updated task if it exists
    async fn mark_done(&self, id: &str) -> Result<Option<Task>>;

    /// Delete every task; returns how many were removed
    async fn clear_all(&self) -> Result<usize>;

    /// Irreversibly destroy the whole database
    async fn wipe(&self) -> Result<()>;
}
