//! Domain model for the prospect roster.
//!
//! # Responsibility
//! - Define the canonical record captured from a scanned card or badge.
//!
//! # Invariants
//! - Every prospect is identified by a stable `ProspectId`.
//! - `created_at` is fixed at creation and only used for recency ordering.
//! - The contacted flag changes only through `ProspectStore::toggle`.

pub mod prospect;
