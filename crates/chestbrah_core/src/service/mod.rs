//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validated construction and store calls into session APIs.
//! - Keep the CLI decoupled from CSV details.

pub mod roster_service;
