//! Persistence layer for roster members.
//!
//! # Responsibility
//! - Define the save/load contract used by the roster service.
//! - Keep CSV layout details inside the persistence boundary.
//!
//! # Invariants
//! - Load paths rebuild every row through validated construction.
//! - A missing source is reported, never raised.

pub mod member_store;
