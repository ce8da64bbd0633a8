//! Member domain model.
//!
//! # Responsibility
//! - Define the canonical `User` triple (name, email, join timestamp).
//! - Model gym membership as a tagged variant instead of a subtype.
//! - Render the human-readable one-line description per variant.
//!
//! # Invariants
//! - `User` fields are private; every constructor runs `validate_identity`.
//! - `created_at` is assigned once and never recomputed, including on reload.
//! - `gym` is free text with no length or character constraints.

use crate::clock::Clock;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

// Syntactic shape only: no quoted local parts, no IP-literal domains.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

/// Returns whether `email` has the `local@domain.tld` shape.
///
/// The TLD must be at least two ASCII letters. This is a predicate and never
/// fails; construction paths turn `false` into `UserValidationError`.
pub fn email_is_valid(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Construction-time validation failure for `User`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Name is empty or whitespace-only.
    MissingName,
    /// Email does not match the email-shape predicate.
    InvalidEmail(String),
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "missing name"),
            Self::InvalidEmail(email) => write!(f, "invalid email: {email}"),
        }
    }
}

impl Error for UserValidationError {}

/// Validated name/email/timestamp triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    name: String,
    email: String,
    created_at: String,
}

impl User {
    /// Creates a user stamped with the clock's current time.
    ///
    /// # Errors
    /// - `MissingName` when `name` is blank, regardless of `email`.
    /// - `InvalidEmail` when `email` fails [`email_is_valid`].
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        clock: &dyn Clock,
    ) -> Result<Self, UserValidationError> {
        let name = name.into();
        let email = email.into();
        validate_identity(&name, &email)?;
        Ok(Self {
            name,
            email,
            created_at: clock.now_stamp(),
        })
    }

    /// Rebuilds a user from persisted fields, keeping `created_at` verbatim.
    ///
    /// Runs the same validation as [`User::new`] so corrupted rows never
    /// become in-memory records.
    pub fn restore(
        name: impl Into<String>,
        email: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let name = name.into();
        let email = email.into();
        validate_identity(&name, &email)?;
        Ok(Self {
            name,
            email,
            created_at: created_at.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Join timestamp formatted `YYYY-MM-DD HH:MM:SS`.
    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// Renders `"{name} ({email}) joined on {created_at}"`.
    pub fn describe(&self) -> String {
        format!(
            "{} ({}) joined on {}",
            self.name, self.email, self.created_at
        )
    }
}

/// Roster entry: a plain user or a user repping a gym.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    /// User without gym affiliation.
    Regular(User),
    /// User affiliated with a gym. `gym` is unvalidated free text.
    GymBro { user: User, gym: String },
}

impl Member {
    /// Creates a validated regular member.
    pub fn regular(
        name: impl Into<String>,
        email: impl Into<String>,
        clock: &dyn Clock,
    ) -> Result<Self, UserValidationError> {
        User::new(name, email, clock).map(Self::Regular)
    }

    /// Creates a validated gym member.
    ///
    /// An empty `gym` is accepted; callers that have no gym should prefer
    /// [`Member::regular`].
    pub fn gym_bro(
        name: impl Into<String>,
        email: impl Into<String>,
        gym: impl Into<String>,
        clock: &dyn Clock,
    ) -> Result<Self, UserValidationError> {
        let user = User::new(name, email, clock)?;
        Ok(Self::GymBro {
            user,
            gym: gym.into(),
        })
    }

    pub fn user(&self) -> &User {
        match self {
            Self::Regular(user) => user,
            Self::GymBro { user, .. } => user,
        }
    }

    pub fn name(&self) -> &str {
        self.user().name()
    }

    pub fn email(&self) -> &str {
        self.user().email()
    }

    pub fn created_at(&self) -> &str {
        self.user().created_at()
    }

    /// Returns the gym name, or `None` for regular members.
    pub fn gym(&self) -> Option<&str> {
        match self {
            Self::Regular(_) => None,
            Self::GymBro { gym, .. } => Some(gym.as_str()),
        }
    }

    pub fn is_gym_bro(&self) -> bool {
        matches!(self, Self::GymBro { .. })
    }

    /// One-line presentation, dispatched on variant.
    ///
    /// - Regular: `"{name} ({email}) joined on {created_at}"`
    /// - GymBro: `"{name}, repping {gym}, joined on {created_at}"`
    pub fn describe(&self) -> String {
        match self {
            Self::Regular(user) => user.describe(),
            Self::GymBro { user, gym } => format!(
                "{}, repping {}, joined on {}",
                user.name(),
                gym,
                user.created_at()
            ),
        }
    }
}

fn validate_identity(name: &str, email: &str) -> Result<(), UserValidationError> {
    if name.trim().is_empty() {
        return Err(UserValidationError::MissingName);
    }
    if !email_is_valid(email) {
        return Err(UserValidationError::InvalidEmail(email.to_string()));
    }
    Ok(())
}
