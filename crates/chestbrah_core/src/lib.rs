//! Core domain logic for the Chestbrah roster.
//! This crate is the single source of truth for member invariants.

pub mod clock;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock, TIMESTAMP_FORMAT};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::member::{email_is_valid, Member, User, UserValidationError};
pub use repo::member_store::{
    AbsentGroup, CsvMemberStore, LoadOutcome, MemberStore, StoreError, StoreOptions, StoreResult,
    DEFAULT_STORE_FILE, NO_GROUP_SENTINEL, STORE_HEADER,
};
pub use service::roster_service::RosterService;

/// Greeting printed when an interactive session starts.
pub fn zyzz_greeting(name: &str) -> String {
    format!("U mirin brah? Welcome to the zyzz world {name}!")
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
