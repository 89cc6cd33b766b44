//! What executing a command produces

use crate::task::Task;

/// Phrase that must be typed to confirm a database wipe
pub const WIPE_PHRASE: &str = "delete-cmdtask-database";

/// How a message should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Success,
    Warn,
    Danger,
    Muted,
    /// Completed tasks
    Complete,
    Info,
    Coffee,
    Plain,
}

/// A styled line (or block) of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub style: Style,
    pub text: String,
}

impl Message {
    pub fn new(style: Style, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Style::Success, text)
    }

    pub fn warn(text: impl Into<String>) -> Self {
        Self::new(Style::Warn, text)
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self::new(Style::Danger, text)
    }

    pub fn muted(text: impl Into<String>) -> Self {
        Self::new(Style::Muted, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Style::Info, text)
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(Style::Plain, text)
    }
}

/// Output of a command, for the caller to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Message(Message),
    /// Task rows, already in listing order
    Tasks(Vec<Task>),
    /// The caller should discard its displayed history
    ClearScreen,
    /// The caller should restart its environment and reopen the store
    Refresh,
}

impl Output {
    /// Render as styled lines
    pub fn lines(&self) -> Vec<Message> {
        match self {
            Self::Message(message) => vec![message.clone()],
            Self::Tasks(tasks) => tasks
                .iter()
                .map(|task| {
                    let style = if task.is_done() {
                        Style::Complete
                    } else {
                        Style::Plain
                    };
                    Message::new(style, format_task(task))
                })
                .collect(),
            Self::ClearScreen | Self::Refresh => Vec::new(),
        }
    }
}

impl From<Message> for Output {
    fn from(message: Message) -> Self {
        Self::Message(message)
    }
}

/// One listing line, e.g. `[ ] [high  ] tsk-001 - write spec`
pub fn format_task(task: &Task) -> String {
    let status = if task.is_done() { "[x]" } else { "[ ]" };
    format!(
        "{} [{:<6}] {} - {}",
        status,
        task.priority.as_str(),
        task.id,
        task.task_name
    )
}

/// A destructive action held back until the user confirms it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeleteTask { id: String },
    Purge,
    WipeDatabase,
}

/// What the confirming input line has to look like
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmRule {
    /// `y` or `yes`
    YesNo,
    /// The exact phrase, nothing else
    Phrase(String),
}

impl ConfirmRule {
    pub fn matches(&self, answer: &str) -> bool {
        let answer = answer.trim();
        match self {
            Self::YesNo => answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"),
            Self::Phrase(phrase) => answer == phrase.as_str(),
        }
    }

    /// Message shown when the answer did not match
    pub fn cancelled_message(&self) -> Message {
        match self {
            Self::YesNo => Message::muted("Action cancelled."),
            Self::Phrase(_) => Message::muted("Action cancelled. Phrase did not match."),
        }
    }
}

/// Confirmation descriptor returned instead of running a destructive action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub action: PendingAction,
    pub rule: ConfirmRule,
}

impl Confirmation {
    pub fn yes_no(action: PendingAction) -> Self {
        Self {
            action,
            rule: ConfirmRule::YesNo,
        }
    }

    pub fn phrase(action: PendingAction, phrase: impl Into<String>) -> Self {
        Self {
            action,
            rule: ConfirmRule::Phrase(phrase.into()),
        }
    }

    /// The phrase the user has to type, if yes/no is not enough
    pub fn required_phrase(&self) -> Option<&str> {
        match &self.rule {
            ConfirmRule::Phrase(phrase) => Some(phrase.as_str()),
            ConfirmRule::YesNo => None,
        }
    }
}

/// Result of executing one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: Output,
    pub confirm: Option<Confirmation>,
}

impl Outcome {
    pub fn new(output: impl Into<Output>) -> Self {
        Self {
            output: output.into(),
            confirm: None,
        }
    }

    pub fn awaiting(output: impl Into<Output>, confirmation: Confirmation) -> Self {
        Self {
            output: output.into(),
            confirm: Some(confirmation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{NewTask, TaskPriority, TaskStatus};
    use chrono::Utc;

    #[test]
    fn test_format_task() {
        let mut task = Task::new(
            "tsk-001",
            NewTask::new("write spec").with_priority(TaskPriority::High),
            Utc::now(),
        );
        assert_eq!(format_task(&task), "[ ] [high  ] tsk-001 - write spec");

        task.status = TaskStatus::Done;
        task.priority = TaskPriority::Medium;
        assert_eq!(format_task(&task), "[x] [medium] tsk-001 - write spec");
    }

    #[test]
    fn test_done_rows_are_complete_styled() {
        let pending = Task::new("tsk-001", NewTask::new("a"), Utc::now());
        let mut done = Task::new("tsk-002", NewTask::new("b"), Utc::now());
        done.status = TaskStatus::Done;

        let lines = Output::Tasks(vec![pending, done]).lines();
        assert_eq!(lines[0].style, Style::Plain);
        assert_eq!(lines[1].style, Style::Complete);
        assert!(Output::ClearScreen.lines().is_empty());
    }

    #[test]
    fn test_yes_no_rule() {
        let rule = ConfirmRule::YesNo;
        assert!(rule.matches("y"));
        assert!(rule.matches(" YES "));
        assert!(!rule.matches("yep"));
        assert!(!rule.matches("n"));
        assert!(!rule.matches(""));
    }

    #[test]
    fn test_phrase_rule() {
        let confirmation = Confirmation::phrase(PendingAction::WipeDatabase, WIPE_PHRASE);
        assert_eq!(confirmation.required_phrase(), Some(WIPE_PHRASE));
        assert!(confirmation.rule.matches(WIPE_PHRASE));
        assert!(!confirmation.rule.matches("yes"));
        assert!(!confirmation.rule.matches("y"));
        assert!(!confirmation.rule.matches("DELETE-CMDTASK-DATABASE"));
    }
}
