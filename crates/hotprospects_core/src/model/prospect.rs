//! Prospect domain model.
//!
//! # Responsibility
//! - Define the record tracked through the outreach lifecycle.
//! - Keep identity, creation time and contacted state read-only to callers.
//!
//! # Invariants
//! - `id` is generated once and never reused for another prospect.
//! - `created_at` never changes after construction.
//! - `is_contacted` has no public setter; only the owning store flips it.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for one prospect record.
pub type ProspectId = Uuid;

/// Name used when a prospect is created without one.
pub const DEFAULT_PROSPECT_NAME: &str = "Anonymous";

/// One prospect tracked through the uncontacted -> contacted lifecycle.
///
/// Serialized field names (`id`, `createdAt`, `name`, `email`,
/// `isContacted`) are the persisted file format and must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prospect {
    id: ProspectId,
    /// Unix epoch milliseconds.
    created_at: i64,
    name: String,
    email: String,
    is_contacted: bool,
}

impl Prospect {
    /// Creates an uncontacted prospect with placeholder name and empty email.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: now_epoch_ms(),
            name: DEFAULT_PROSPECT_NAME.to_string(),
            email: String::new(),
            is_contacted: false,
        }
    }

    /// Sets the display name at creation time.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the email at creation time. No syntax validation is applied.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn id(&self) -> ProspectId {
        self.id
    }

    /// Creation time in Unix epoch milliseconds.
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_contacted(&self) -> bool {
        self.is_contacted
    }

    /// Initial contacted state for records created inside a filtered view.
    pub(crate) fn contacted_at_creation(mut self, contacted: bool) -> Self {
        self.is_contacted = contacted;
        self
    }

    pub(crate) fn toggle_contacted(&mut self) {
        self.is_contacted = !self.is_contacted;
    }

    #[cfg(test)]
    pub(crate) fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }
}

impl Default for Prospect {
    fn default() -> Self {
        Self::new()
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}
