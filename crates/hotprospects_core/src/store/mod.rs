//! In-memory prospect roster and its use-case operations.
//!
//! # Responsibility
//! - Own the ordered prospect collection and enforce its invariants.
//! - Persist after every mutation and signal observers afterwards.
//!
//! # Invariants
//! - Prospect ids are unique within one store.
//! - Mutations (add, toggle, sort) always attempt a save, then notify.
//! - Queries never mutate state or touch storage.

pub mod prospect_store;
