//! Scan ingestion for raw code payloads.
//!
//! # Responsibility
//! - Turn text decoded from a card or badge code into contact fields.
//!
//! # Invariants
//! - Parsing is pure: no I/O, no logging, no store access.

pub mod code_parser;
