//! Reminder scheduler contracts and notification-center adapter.

use crate::model::prospect::Prospect;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use uuid::Uuid;

/// Delay used when the caller does not pick one.
pub const DEFAULT_REMINDER_DELAY: Duration = Duration::from_secs(5);

/// One time-delayed notification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    /// Fresh per request; never derived from the prospect id.
    pub identifier: Uuid,
    pub title: String,
    pub subtitle: String,
    pub delay: Duration,
}

impl ReminderRequest {
    pub fn for_prospect(prospect: &Prospect, delay: Duration) -> Self {
        Self {
            identifier: Uuid::new_v4(),
            title: format!("Contact {}", prospect.name()),
            subtitle: prospect.email().to_string(),
            delay,
        }
    }

    pub fn delay_seconds(&self) -> u64 {
        self.delay.as_secs()
    }
}

/// Consumer-facing reminder contract.
pub trait ReminderScheduler {
    /// Requests a reminder for `prospect` after `delay`. Never fails visibly.
    fn schedule_reminder(&self, prospect: &Prospect, delay: Duration);
}

/// Notification permission state reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    NotDetermined,
    Authorized,
    Denied,
}

/// Platform notification failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationError {
    pub message: String,
}

impl NotificationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for NotificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "notification center error: {}", self.message)
    }
}

impl Error for NotificationError {}

/// Platform notification subsystem, consumed at its interface only.
pub trait NotificationCenter {
    fn authorization_status(&self) -> AuthorizationStatus;
    /// Prompts for permission; `Ok(true)` when granted.
    fn request_authorization(&self) -> Result<bool, NotificationError>;
    fn submit(&self, request: ReminderRequest) -> Result<(), NotificationError>;
}

/// Scheduler that ensures authorization and then submits to a notification center.
pub struct NotificationReminderScheduler<C: NotificationCenter> {
    center: C,
    granted: AtomicBool,
}

impl<C: NotificationCenter> NotificationReminderScheduler<C> {
    pub fn new(center: C) -> Self {
        Self {
            center,
            granted: AtomicBool::new(false),
        }
    }

    pub fn center(&self) -> &C {
        &self.center
    }

    /// Returns whether requests may be submitted, prompting at most once per grant.
    fn ensure_authorized(&self) -> bool {
        if self.granted.load(Ordering::Acquire) {
            return true;
        }

        let granted = match self.center.authorization_status() {
            AuthorizationStatus::Authorized => true,
            AuthorizationStatus::Denied => false,
            AuthorizationStatus::NotDetermined => match self.center.request_authorization() {
                Ok(granted) => granted,
                Err(err) => {
                    warn!(
                        "event=reminder_authorize module=reminder status=error error={}",
                        err
                    );
                    false
                }
            },
        };

        if granted {
            self.granted.store(true, Ordering::Release);
        }
        granted
    }
}

impl<C: NotificationCenter> ReminderScheduler for NotificationReminderScheduler<C> {
    fn schedule_reminder(&self, prospect: &Prospect, delay: Duration) {
        if !self.ensure_authorized() {
            info!(
                "event=reminder_schedule module=reminder status=declined reason=not_authorized prospect_id={}",
                prospect.id()
            );
            return;
        }

        let request = ReminderRequest::for_prospect(prospect, delay);
        let request_id = request.identifier;
        match self.center.submit(request) {
            Ok(()) => info!(
                "event=reminder_schedule module=reminder status=ok prospect_id={} request_id={} delay_s={}",
                prospect.id(),
                request_id,
                delay.as_secs()
            ),
            Err(err) => warn!(
                "event=reminder_schedule module=reminder status=error prospect_id={} error={}",
                prospect.id(),
                err
            ),
        }
    }
}
