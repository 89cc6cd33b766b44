//! Command executor - runs parsed commands against a task repository
//!
//! Destructive commands never run straight away. Executing them only
//! returns a [`Confirmation`]; the action itself runs through
//! [`CommandExecutor::confirm`] once the caller has a matching answer.

mod outcome;
pub mod text;

use std::sync::Arc;

use chrono::Local;
use tracing::{debug, info};

use crate::command::{Command, ListFilter};
use crate::task::{NewTask, TaskRepository};
use crate::Result;

pub use outcome::{
    format_task, ConfirmRule, Confirmation, Message, Outcome, Output, PendingAction, Style,
    WIPE_PHRASE,
};

const INVALID_ID: &str = "Invalid task ID. Double-check and try again.";

/// Executes commands against a task repository
pub struct CommandExecutor<R> {
    repo: Arc<R>,
}

impl<R: TaskRepository> CommandExecutor<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repo
    }

    /// Execute a command
    ///
    /// Storage failures are returned as errors; everything else, including
    /// bad input and unknown ids, is reported through the outcome.
    pub async fn execute(&self, command: Command) -> Result<Outcome> {
        debug!("Executing '{}'", command.action());

        let outcome = match command {
            Command::Add {
                task_name,
                priority,
            } => {
                let task = self
                    .repo
                    .add_task(NewTask::new(task_name).with_priority(priority))
                    .await?;
                Outcome::new(Message::success(format!(
                    "Task added: \"{}\" [{}]",
                    task.task_name, task.priority
                )))
            }

            Command::List { filter } => {
                let tasks = match filter {
                    ListFilter::All => self.repo.get_all_tasks().await?,
                    ListFilter::Status(status) => self.repo.get_tasks_by_status(status).await?,
                    ListFilter::Priority(priority) => {
                        self.repo.get_tasks_by_priority(priority).await?
                    }
                };
                if tasks.is_empty() {
                    Outcome::new(Message::muted("No tasks found."))
                } else {
                    Outcome::new(Output::Tasks(tasks))
                }
            }

            Command::Delete { id } => match self.repo.get_task_by_id(&id).await? {
                Some(task) => Outcome::awaiting(
                    Message::warn(format!(
                        "Are you sure you want to delete \"{}\" ({})? (y/n)",
                        task.task_name, task.id
                    )),
                    Confirmation::yes_no(PendingAction::DeleteTask { id: task.id }),
                ),
                None => Outcome::new(Message::warn(INVALID_ID)),
            },

            // Looking the task up and flipping it happen in one transaction
            Command::Done { id, .. } => match self.repo.mark_done(&id).await? {
                Some(task) => {
                    Outcome::new(Message::success(format!("Task marked as done: {}", task.id)))
                }
                None => Outcome::new(Message::warn(INVALID_ID)),
            },

            Command::Purge => {
                if self.repo.get_all_tasks().await?.is_empty() {
                    Outcome::new(Message::muted("No tasks to purge."))
                } else {
                    Outcome::awaiting(
                        Message::danger("This will permanently delete all tasks. Proceed? (y/n)"),
                        Confirmation::yes_no(PendingAction::Purge),
                    )
                }
            }

            Command::WipeDb => Outcome::awaiting(
                Message::danger(format!(
                    "This will permanently delete the entire cmdtask database, including all tasks. Type \"{}\" to confirm.",
                    WIPE_PHRASE
                )),
                Confirmation::phrase(PendingAction::WipeDatabase, WIPE_PHRASE),
            ),

            Command::Clear => Outcome::new(Output::ClearScreen),
            Command::Refresh => Outcome::new(Output::Refresh),

            Command::Help => Outcome::new(Message::plain(text::HELP_TEXT)),
            Command::About => Outcome::new(Message::plain(text::ABOUT_TEXT)),
            Command::IndexedDb => Outcome::new(Message::plain(text::STORAGE_TEXT)),
            Command::Ping => Outcome::new(Message::info("pong!")),
            Command::Date => Outcome::new(Message::info(format!(
                "It's {} today.",
                Local::now().format("%A, %B %-d, %Y")
            ))),
            Command::Coffee => {
                Outcome::new(Message::new(Style::Coffee, quote(text::COFFEE_QUOTES)))
            }
            Command::NotFound => Outcome::new(Message::info(quote(text::NOT_FOUND_QUOTES))),
            Command::Motivate => Outcome::new(Message::info(quote(text::MOTIVATION_QUOTES))),
            Command::Hack => Outcome::new(Message::danger(quote(text::HACKER_QUOTES))),

            Command::Error { message } => Outcome::new(Message::danger(message)),
            Command::Invalid { input } => Outcome::new(Message::danger(format!(
                "Unknown command '{}'. Type 'help' for a list of commands.",
                input
            ))),
        };

        Ok(outcome)
    }

    /// Run a destructive action the user has confirmed
    pub async fn confirm(&self, action: PendingAction) -> Result<Outcome> {
        let message = match action {
            PendingAction::DeleteTask { id } => {
                if self.repo.delete_task(&id).await? {
                    Message::success(format!("Task deleted: {}", id))
                } else {
                    // Gone since the prompt was shown
                    Message::warn(INVALID_ID)
                }
            }
            PendingAction::Purge => {
                let removed = self.repo.clear_all().await?;
                info!("Purged {} task(s)", removed);
                Message::success("All tasks deleted from the database.")
            }
            PendingAction::WipeDatabase => {
                self.repo.wipe().await?;
                Message::success("Database wiped. Run 'refresh' to reinitialize.")
            }
        };
        Ok(Outcome::new(message))
    }
}

fn quote(pool: &[&'static str]) -> &'static str {
    text::random_quote(pool).unwrap_or_default()
}
