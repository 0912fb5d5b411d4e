//! Core domain logic for HotProspects.
//! This crate owns the prospect roster and every invariant on it.

pub mod config;
pub mod logging;
pub mod model;
pub mod reminder;
pub mod repo;
pub mod scan;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use logging::{
    default_log_level, init_logging, logging_status, LogConfig, LogLevel, LoggingError,
};
pub use model::prospect::{Prospect, ProspectId, DEFAULT_PROSPECT_NAME};
pub use reminder::scheduler::{
    AuthorizationStatus, NotificationCenter, NotificationError, NotificationReminderScheduler,
    ReminderRequest, ReminderScheduler, DEFAULT_REMINDER_DELAY,
};
pub use repo::prospect_repo::{
    JsonFileProspectRepository, PersistResult, PersistenceError, ProspectRepository,
};
pub use scan::code_parser::{parse_scan_payload, ParseError, ScannedContact};
pub use store::prospect_store::{
    ProspectFilter, ProspectStore, ReminderOutcome, SortOrder, StoreError, StoreResult,
    SubscriptionId,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
