//! Interactive session state
//!
//! A session is either idle or waiting for the answer to a confirmation.
//! While waiting, the next line is only ever treated as that answer.

use tracing::debug;

use crate::command::parse;
use crate::executor::{CommandExecutor, Confirmation, Outcome};
use crate::task::TaskRepository;
use crate::Result;

/// State of an interactive session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// A destructive action is waiting for its confirmation line
    AwaitingConfirmation(Confirmation),
}

impl SessionState {
    pub fn is_awaiting(&self) -> bool {
        matches!(self, Self::AwaitingConfirmation(_))
    }
}

/// One user's interactive session over a task repository
pub struct Session<R> {
    executor: CommandExecutor<R>,
    state: SessionState,
}

impl<R: TaskRepository> Session<R> {
    pub fn new(executor: CommandExecutor<R>) -> Self {
        Self {
            executor,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn executor(&self) -> &CommandExecutor<R> {
        &self.executor
    }

    /// Drop any pending confirmation without running it
    pub fn cancel(&mut self) -> Option<Confirmation> {
        match std::mem::take(&mut self.state) {
            SessionState::AwaitingConfirmation(confirmation) => Some(confirmation),
            SessionState::Idle => None,
        }
    }

    /// Handle one line of input
    ///
    /// The pending confirmation is consumed before anything runs, so the
    /// session is idle again afterwards even if the action fails.
    pub async fn handle_line(&mut self, line: &str) -> Result<Outcome> {
        let line = line.trim();

        if let Some(confirmation) = self.cancel() {
            if !confirmation.rule.matches(line) {
                debug!("Confirmation declined for {:?}", confirmation.action);
                return Ok(Outcome::new(confirmation.rule.cancelled_message()));
            }
            return self.executor.confirm(confirmation.action).await;
        }

        let outcome = self.executor.execute(parse(line)).await?;
        if let Some(confirmation) = &outcome.confirm {
            self.state = SessionState::AwaitingConfirmation(confirmation.clone());
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{Message, Output, PendingAction, WIPE_PHRASE};
    use crate::task::TaskStore;
    use crate::Error;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_test_session() -> (Session<TaskStore>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = TaskStore::new(temp_dir.path(), "cmdtask");
        let session = Session::new(CommandExecutor::new(Arc::new(store)));
        (session, temp_dir)
    }

    async fn send(session: &mut Session<TaskStore>, line: &str) -> Outcome {
        session.handle_line(line).await.unwrap()
    }

    async fn task_count(session: &Session<TaskStore>) -> usize {
        session
            .executor()
            .repository()
            .get_all_tasks()
            .await
            .unwrap()
            .len()
    }

    #[tokio::test]
    async fn test_purge_then_yes() {
        let (mut session, _temp) = create_test_session();
        send(&mut session, "add first").await;
        send(&mut session, "add second --high").await;

        send(&mut session, "purge").await;
        assert!(session.state().is_awaiting());

        let outcome = send(&mut session, "yes").await;
        assert_eq!(
            outcome.output,
            Output::Message(Message::success("All tasks deleted from the database."))
        );
        assert_eq!(session.state(), &SessionState::Idle);

        let listed = send(&mut session, "list").await;
        assert_eq!(
            listed.output,
            Output::Message(Message::muted("No tasks found."))
        );
    }

    #[tokio::test]
    async fn test_mismatched_answer_cancels() {
        let (mut session, _temp) = create_test_session();
        send(&mut session, "add keep").await;

        send(&mut session, "delete tsk-001").await;
        let outcome = send(&mut session, "nope").await;

        assert_eq!(
            outcome.output,
            Output::Message(Message::muted("Action cancelled."))
        );
        assert_eq!(session.state(), &SessionState::Idle);
        assert_eq!(task_count(&session).await, 1);
    }

    #[tokio::test]
    async fn test_answer_is_not_parsed_as_command() {
        let (mut session, _temp) = create_test_session();
        send(&mut session, "add keep").await;

        send(&mut session, "purge").await;
        // A command typed while awaiting only cancels
        send(&mut session, "add sneaky").await;

        assert_eq!(task_count(&session).await, 1);
    }

    #[tokio::test]
    async fn test_wipe_ignores_yes() {
        let (mut session, temp) = create_test_session();
        send(&mut session, "add precious").await;

        send(&mut session, "wipe-db").await;
        let outcome = send(&mut session, "yes").await;
        assert_eq!(
            outcome.output,
            Output::Message(Message::muted("Action cancelled. Phrase did not match."))
        );
        assert_eq!(task_count(&session).await, 1);

        send(&mut session, "wipe-db").await;
        send(&mut session, WIPE_PHRASE).await;
        assert!(!temp.path().join("cmdtask.json").exists());
    }

    #[tokio::test]
    async fn test_failed_confirmation_leaves_session_idle() {
        let (mut session, _temp) = create_test_session();
        send(&mut session, "add held").await;

        send(&mut session, "wipe-db").await;
        let held = session.executor().repository().open().await.unwrap();

        let result = session.handle_line(WIPE_PHRASE).await;
        assert!(matches!(result, Err(Error::DeletionBlocked { .. })));
        assert_eq!(session.state(), &SessionState::Idle);

        drop(held);
        assert_eq!(task_count(&session).await, 1);
    }

    #[tokio::test]
    async fn test_cancel_clears_pending() {
        let (mut session, _temp) = create_test_session();
        send(&mut session, "add one").await;
        send(&mut session, "purge").await;

        let cancelled = session.cancel().unwrap();
        assert_eq!(cancelled.action, PendingAction::Purge);
        assert!(session.cancel().is_none());

        // The next line is a normal command again
        send(&mut session, "y").await;
        assert_eq!(task_count(&session).await, 1);
    }
}
