//! Follow-up reminder scheduling seam.
//!
//! # Responsibility
//! - Describe reminder requests issued for uncontacted prospects.
//! - Gate delivery on notification authorization in one operation.
//!
//! # Invariants
//! - Scheduling is fire-and-forget; callers never observe delivery failures.
//! - No request is issued for a prospect already marked contacted.
//! - Reminders are never cancelled by this crate.

pub mod scheduler;
