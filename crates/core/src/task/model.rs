//! Task model definitions

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Task status
///
/// Declaration order is listing order: pending tasks sort before done ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Done,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "done" => Ok(Self::Done),
            _ => Err(Error::InvalidInput(format!("Invalid status: {}", s))),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority level
///
/// Declaration order is listing order: high sorts before medium before low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Low
    }
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [Self::High, Self::Medium, Self::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// The command-line flag selecting this priority, e.g. `--high`
    pub fn flag(&self) -> &'static str {
        match self {
            Self::High => "--high",
            Self::Medium => "--medium",
            Self::Low => "--low",
        }
    }

    /// Resolve a flag token such as `--Medium`; matching ignores case
    pub fn from_flag(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.flag().eq_ignore_ascii_case(token))
    }
}

impl FromStr for TaskPriority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(Error::InvalidInput(format!("Invalid priority: {}", s))),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to create a task; the store assigns id, status and creation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub task_name: String,
    pub priority: TaskPriority,
}

impl NewTask {
    pub fn new(task_name: impl Into<String>) -> Self {
        Self {
            task_name: task_name.into(),
            priority: TaskPriority::default(),
        }
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }
}

/// A persisted task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub task_name: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(id: impl Into<String>, request: NewTask, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            task_name: request.task_name,
            priority: request.priority,
            status: TaskStatus::Pending,
            created_at,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Listing order: status, then priority, then creation time.
    ///
    /// The id only breaks ties between records with identical timestamps,
    /// which the store never produces.
    pub fn listing_order(&self, other: &Self) -> Ordering {
        self.status
            .cmp(&other.status)
            .then(self.priority.cmp(&other.priority))
            .then(self.created_at.cmp(&other.created_at))
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Sort tasks into listing order
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(Task::listing_order);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn task(id: &str, priority: TaskPriority, status: TaskStatus, offset_ms: i64) -> Task {
        let base = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let mut task = Task::new(
            id,
            NewTask::new(id).with_priority(priority),
            base + Duration::milliseconds(offset_ms),
        );
        task.status = status;
        task
    }

    #[test]
    fn test_new_task_defaults() {
        let request = NewTask::new("Write docs");
        assert_eq!(request.priority, TaskPriority::Low);

        let task = Task::new("tsk-001", request, Utc::now());
        assert_eq!(task.task_name, "Write docs");
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(!task.is_done());
    }

    #[test]
    fn test_priority_flags() {
        assert_eq!(TaskPriority::from_flag("--high"), Some(TaskPriority::High));
        assert_eq!(TaskPriority::from_flag("--MEDIUM"), Some(TaskPriority::Medium));
        assert_eq!(TaskPriority::from_flag("--low"), Some(TaskPriority::Low));
        assert_eq!(TaskPriority::from_flag("--urgent"), None);
        assert_eq!(TaskPriority::from_flag("high"), None);
    }

    #[test]
    fn test_parse_status_and_priority() {
        assert_eq!("Done".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert_eq!("pending".parse::<TaskStatus>().unwrap(), TaskStatus::Pending);
        assert!("archived".parse::<TaskStatus>().is_err());
        assert_eq!("medium".parse::<TaskPriority>().unwrap(), TaskPriority::Medium);
        assert!("urgent".parse::<TaskPriority>().is_err());
    }

    #[test]
    fn test_listing_order() {
        let mut tasks = vec![
            task("a", TaskPriority::High, TaskStatus::Done, 0),
            task("b", TaskPriority::Low, TaskStatus::Pending, 10),
            task("c", TaskPriority::Low, TaskStatus::Pending, 5),
            task("d", TaskPriority::Medium, TaskStatus::Pending, 20),
            task("e", TaskPriority::High, TaskStatus::Pending, 30),
        ];
        sort_tasks(&mut tasks);

        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["e", "d", "c", "b", "a"]);
    }

    #[test]
    fn test_serialized_field_names() {
        let task = task("tsk-001", TaskPriority::High, TaskStatus::Pending, 0);
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["taskName"], "tsk-001");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["status"], "pending");
        assert!(json.get("createdAt").is_some());
    }
}
