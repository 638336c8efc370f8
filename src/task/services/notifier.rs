//! Deadline reminders delivered through the messaging service.

use super::prompts;
use crate::task::{domain::Task, ports::MessagingService};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Default channel for reminders.
pub const DEFAULT_REMINDER_CHANNEL: &str = "#general";

/// Result of a reminder attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// The reminder was delivered and the task marked notified.
    Delivered,
    /// Delivery failed; the failure has been logged.
    Failed,
}

impl NotificationOutcome {
    /// Returns `true` when the reminder was delivered.
    #[must_use]
    pub const fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Sends reminders for tasks.
#[derive(Clone)]
pub struct ReminderNotifier<S>
where
    S: MessagingService,
{
    messaging: Arc<S>,
    channel: String,
}

impl<S> ReminderNotifier<S>
where
    S: MessagingService,
{
    /// Creates a notifier posting to `channel`.
    #[must_use]
    pub fn new(messaging: Arc<S>, channel: impl Into<String>) -> Self {
        Self {
            messaging,
            channel: channel.into(),
        }
    }

    /// Returns the channel reminders are posted to.
    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Sends a reminder for `task`.
    ///
    /// Failures are logged and reported through the outcome, never raised.
    /// A delivered reminder moves a pending task to `Notified`.
    pub async fn notify(&self, task: &mut Task) -> NotificationOutcome {
        let message = match prompts::reminder_message(task) {
            Ok(message) => message,
            Err(err) => {
                error!(task_id = %task.id(), error = %err, "Failed to build reminder");
                return NotificationOutcome::Failed;
            }
        };

        if let Err(err) = self.messaging.post(&self.channel, &message).await {
            error!(
                task_id = %task.id(),
                channel = %self.channel,
                error = %err,
                "Failed to send reminder"
            );
            return NotificationOutcome::Failed;
        }

        info!(task_id = %task.id(), channel = %self.channel, %message, "Sent reminder");
        if let Err(err) = task.mark_notified() {
            debug!(task_id = %task.id(), error = %err, "Status left unchanged");
        }
        NotificationOutcome::Delivered
    }
}
