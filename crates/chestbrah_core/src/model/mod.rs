//! Roster domain model.
//!
//! # Responsibility
//! - Define the validated user record and its gym-member variant.
//! - Own the email-shape predicate shared by input and load paths.
//!
//! # Invariants
//! - No record exists in memory in an invalid state.
//! - Records are never mutated after construction.

pub mod member;
