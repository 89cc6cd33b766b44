//! Command module
//!
//! Structured commands and the parser that produces them from a raw line.

mod parser;

pub use parser::parse;

use crate::task::{TaskPriority, TaskStatus};

/// Which tasks a `list` command shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFilter {
    #[default]
    All,
    Status(TaskStatus),
    Priority(TaskPriority),
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        task_name: String,
        priority: TaskPriority,
    },
    List {
        filter: ListFilter,
    },
    Delete {
        id: String,
    },
    Done {
        id: String,
        status: TaskStatus,
    },
    Clear,
    Purge,
    Help,
    About,
    /// Information about where tasks are stored
    IndexedDb,
    Ping,
    Date,
    Coffee,
    NotFound,
    Motivate,
    Hack,
    Refresh,
    WipeDb,
    /// A recognised command with bad arguments
    Error {
        message: String,
    },
    /// Anything the parser did not recognise
    Invalid {
        input: String,
    },
}

impl Command {
    /// The action tag, as typed at the prompt
    pub fn action(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::List { .. } => "list",
            Self::Delete { .. } => "delete",
            Self::Done { .. } => "done",
            Self::Clear => "clear",
            Self::Purge => "purge",
            Self::Help => "help",
            Self::About => "about",
            Self::IndexedDb => "indexeddb",
            Self::Ping => "ping",
            Self::Date => "date",
            Self::Coffee => "coffee",
            Self::NotFound => "404",
            Self::Motivate => "motivate",
            Self::Hack => "hack",
            Self::Refresh => "refresh",
            Self::WipeDb => "wipe-db",
            Self::Error { .. } => "error",
            Self::Invalid { .. } => "invalid",
        }
    }

    /// Commands that never run without a confirmation step
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::Delete { .. } | Self::Purge | Self::WipeDb)
    }
}
