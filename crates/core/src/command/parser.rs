//! Command line parser
//!
//! Turns one raw input line into a [`Command`]. Parsing never fails: bad
//! arguments become [`Command::Error`] and unknown words [`Command::Invalid`].

use super::{Command, ListFilter};
use crate::task::{TaskPriority, TaskStatus};

const FLAG_PREFIX: &str = "--";

const ADD_USAGE: &str = "Usage: add \"task name\" [--high|--medium|--low]";

/// Parse a raw input line
pub fn parse(input: &str) -> Command {
    let mut tokens = input.split_whitespace();
    let command = tokens.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = tokens.collect();

    match command.as_str() {
        "add" => parse_add(&args),
        "list" => parse_list(&args),
        "delete" => match task_id(&args) {
            Some(id) => Command::Delete { id },
            None => usage_error("delete"),
        },
        "done" => match task_id(&args) {
            Some(id) => Command::Done {
                id,
                status: TaskStatus::Done,
            },
            None => usage_error("done"),
        },
        "clear" => Command::Clear,
        "purge" => Command::Purge,
        "help" => Command::Help,
        "about" => Command::About,
        "indexeddb" => Command::IndexedDb,
        "ping" => Command::Ping,
        "date" => Command::Date,
        "coffee" => Command::Coffee,
        "404" => Command::NotFound,
        "motivate" => Command::Motivate,
        "hack" => Command::Hack,
        "refresh" => Command::Refresh,
        "wipe-db" => Command::WipeDb,
        _ => Command::Invalid {
            input: input.to_string(),
        },
    }
}

fn is_flag(token: &str) -> bool {
    token.starts_with(FLAG_PREFIX)
}

fn parse_add(args: &[&str]) -> Command {
    let mut priority = None;
    for flag in args.iter().copied().filter(|arg| is_flag(arg)) {
        match TaskPriority::from_flag(flag) {
            Some(p) => {
                priority.get_or_insert(p);
            }
            None => {
                return Command::Error {
                    message: format!(
                        "Invalid priority flag '{}'. Allowed flags: --high, --medium, --low.",
                        flag
                    ),
                }
            }
        }
    }

    let joined = args
        .iter()
        .copied()
        .filter(|arg| !is_flag(arg))
        .collect::<Vec<_>>()
        .join(" ");
    let task_name = strip_quotes(joined.trim()).trim();

    if task_name.is_empty() {
        return Command::Error {
            message: ADD_USAGE.to_string(),
        };
    }

    Command::Add {
        task_name: task_name.to_string(),
        priority: priority.unwrap_or_default(),
    }
}

fn parse_list(args: &[&str]) -> Command {
    if let Some(status) = args
        .first()
        .and_then(|arg| arg.parse::<TaskStatus>().ok())
    {
        return Command::List {
            filter: ListFilter::Status(status),
        };
    }

    let filter = args
        .iter()
        .find_map(|arg| TaskPriority::from_flag(arg))
        .map(ListFilter::Priority)
        .unwrap_or_default();

    Command::List { filter }
}

fn task_id(args: &[&str]) -> Option<String> {
    args.first().map(|id| id.to_string())
}

fn usage_error(command: &str) -> Command {
    Command::Error {
        message: format!("Usage: {} <taskID>", command),
    }
}

/// Drop one pair of matching surrounding quotes
fn strip_quotes(name: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = name
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    name
}
