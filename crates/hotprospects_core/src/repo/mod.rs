//! Persistence layer for the prospect roster.
//!
//! # Responsibility
//! - Define the durable read/write contract used by `ProspectStore`.
//! - Keep file layout and serialization details out of the store.
//!
//! # Invariants
//! - Saves replace the whole collection atomically; a reader never
//!   observes a truncated file.
//! - Loads distinguish a missing/unreadable file from corrupt content.

pub mod prospect_repo;
