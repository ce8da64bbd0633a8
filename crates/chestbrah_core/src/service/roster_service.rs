//! Roster session service.
//!
//! # Responsibility
//! - Own the in-memory member collection for one session.
//! - Enroll members from raw prompt input.
//! - Delegate persistence to a `MemberStore`.
//!
//! # Invariants
//! - Only validated members enter the session collection.
//! - Unpersisted members are dropped with the service.

use crate::clock::Clock;
use crate::model::member::{Member, UserValidationError};
use crate::repo::member_store::{LoadOutcome, MemberStore, StoreResult};
use log::{debug, info};

/// Session facade over a member store and a clock.
pub struct RosterService<S: MemberStore, C: Clock> {
    store: S,
    clock: C,
    members: Vec<Member>,
}

impl<S: MemberStore, C: Clock> RosterService<S, C> {
    /// Creates an empty session.
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            members: Vec::new(),
        }
    }

    /// Validates and appends one member built from raw input.
    ///
    /// # Contract
    /// - `name`, `email` and `gym` are trimmed first.
    /// - `None` or a blank gym yields `Member::Regular`, otherwise
    ///   `Member::GymBro`.
    /// - On error the session is unchanged.
    pub fn enroll(
        &mut self,
        name: &str,
        email: &str,
        gym: Option<&str>,
    ) -> Result<&Member, UserValidationError> {
        let name = name.trim();
        let email = email.trim();
        let member = match gym.map(str::trim).filter(|gym| !gym.is_empty()) {
            Some(gym) => Member::gym_bro(name, email, gym, &self.clock)?,
            None => Member::regular(name, email, &self.clock)?,
        };

        debug!(
            "event=member_enroll module=service status=ok gym_bro={} count={}",
            member.is_gym_bro(),
            self.members.len() + 1
        );
        let slot = self.members.len();
        self.members.push(member);
        Ok(&self.members[slot])
    }

    /// Members enrolled in this session, in insertion order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Saves every session member, replacing the store contents.
    ///
    /// Returns the number of rows written.
    pub fn persist(&self) -> StoreResult<usize> {
        self.store.save(&self.members)?;
        info!(
            "event=roster_persist module=service status=ok rows={}",
            self.members.len()
        );
        Ok(self.members.len())
    }

    /// Loads the store contents without touching the session collection.
    pub fn reload(&self) -> StoreResult<LoadOutcome> {
        self.store.load()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
