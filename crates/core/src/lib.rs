//! Core library for cmdtask
//!
//! This crate contains everything behind the prompt:
//! - Command parsing
//! - Task storage with a versioned, transactional local database
//! - Command execution and the confirmation flow

pub mod command;
pub mod error;
pub mod executor;
pub mod session;
pub mod task;

pub use command::{parse, Command, ListFilter};
pub use error::Error;
pub use executor::{
    CommandExecutor, ConfirmRule, Confirmation, Message, Outcome, Output, PendingAction, Style,
};
pub use session::{Session, SessionState};
pub use task::{NewTask, Task, TaskPriority, TaskRepository, TaskStatus, TaskStore};

pub type Result<T> = std::result::Result<T, Error>;
