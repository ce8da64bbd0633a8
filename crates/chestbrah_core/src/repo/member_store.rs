//! Member store contracts and CSV implementation.
//!
//! # Responsibility
//! - Write the roster as a `name,email,timestamp,group` table.
//! - Read it back, dispatching each row to `Member::Regular` or
//!   `Member::GymBro` by its group column.
//!
//! # Invariants
//! - `save` truncates the destination; it never appends or merges.
//! - `load` rejects invalid persisted rows instead of masking them.
//! - The file handle is dropped on every exit path, including mid-read errors.

use crate::model::member::{Member, User, UserValidationError};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Default roster file name in the working directory.
pub const DEFAULT_STORE_FILE: &str = "chestbrah_users.csv";
/// Header row of the persisted table.
pub const STORE_HEADER: [&str; 4] = ["name", "email", "timestamp", "group"];
/// Group column value meaning "no gym" under [`AbsentGroup::Sentinel`].
pub const NO_GROUP_SENTINEL: &str = "N/A";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for member persistence operations.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Csv(csv::Error),
    /// File shape does not match the expected table layout.
    InvalidData(String),
    /// A persisted row failed validated construction. `row` is 1-based and
    /// excludes the header.
    Validation {
        row: usize,
        source: UserValidationError,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Csv(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted member data: {message}"),
            Self::Validation { row, source } => write!(f, "row {row}: {source}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::Validation { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for StoreError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// How a regular member's empty group column is spelled on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AbsentGroup {
    /// Literal `N/A`. A gym actually named `N/A` reloads as a regular member.
    #[default]
    Sentinel,
    /// Empty field. A gym with an empty name reloads as a regular member.
    Blank,
}

impl AbsentGroup {
    fn marker(self) -> &'static str {
        match self {
            Self::Sentinel => NO_GROUP_SENTINEL,
            Self::Blank => "",
        }
    }
}

/// Codec options for [`CsvMemberStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    pub absent_group: AbsentGroup,
}

/// Result of a load call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Members in file order.
    pub members: Vec<Member>,
    /// `false` when the source did not exist; `members` is then empty.
    pub source_found: bool,
}

/// Save/load contract for a roster.
pub trait MemberStore {
    fn save(&self, members: &[Member]) -> StoreResult<()>;
    fn load(&self) -> StoreResult<LoadOutcome>;
}

/// CSV file-backed member store.
#[derive(Debug, Clone)]
pub struct CsvMemberStore {
    path: PathBuf,
    options: StoreOptions,
}

impl CsvMemberStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, StoreOptions::default())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: StoreOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_rows(&self, members: &[Member]) -> StoreResult<()> {
        let file = File::create(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer.write_record(STORE_HEADER)?;
        for member in members {
            writer.serialize(MemberRow::from_member(member, self.options.absent_group))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn read_rows(&self, file: File) -> StoreResult<Vec<Member>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let headers = reader.headers()?;
        // A zero-byte file holds no members rather than a malformed header.
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        if headers.iter().ne(STORE_HEADER) {
            return Err(StoreError::InvalidData(format!(
                "expected header `{}`, found `{}`",
                STORE_HEADER.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            )));
        }

        let mut members = Vec::new();
        for (index, row) in reader.deserialize::<MemberRow>().enumerate() {
            let member = row?
                .into_member(self.options.absent_group)
                .map_err(|source| StoreError::Validation {
                    row: index + 1,
                    source,
                })?;
            members.push(member);
        }
        Ok(members)
    }
}

impl MemberStore for CsvMemberStore {
    fn save(&self, members: &[Member]) -> StoreResult<()> {
        let started_at = Instant::now();
        match self.write_rows(members) {
            Ok(()) => {
                info!(
                    "event=store_save module=repo status=ok rows={} path={} duration_ms={}",
                    members.len(),
                    self.path.display(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=repo status=error path={} duration_ms={} error={}",
                    self.path.display(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn load(&self) -> StoreResult<LoadOutcome> {
        let started_at = Instant::now();
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(
                    "event=store_load module=repo status=not_found path={}",
                    self.path.display()
                );
                return Ok(LoadOutcome::default());
            }
            Err(err) => return Err(err.into()),
        };

        match self.read_rows(file) {
            Ok(members) => {
                info!(
                    "event=store_load module=repo status=ok rows={} path={} duration_ms={}",
                    members.len(),
                    self.path.display(),
                    started_at.elapsed().as_millis()
                );
                Ok(LoadOutcome {
                    members,
                    source_found: true,
                })
            }
            Err(err) => {
                // Row errors carry user text; only the row number is logged.
                let error_code = match &err {
                    StoreError::Validation { row, .. } => format!("invalid_row row={row}"),
                    StoreError::InvalidData(_) => "invalid_header".to_string(),
                    StoreError::Csv(_) => "malformed_csv".to_string(),
                    StoreError::Io(_) => "io".to_string(),
                };
                error!(
                    "event=store_load module=repo status=error path={} duration_ms={} error_code={}",
                    self.path.display(),
                    started_at.elapsed().as_millis(),
                    error_code
                );
                Err(err)
            }
        }
    }
}

/// On-disk row shape. Field order matches [`STORE_HEADER`].
#[derive(Debug, Serialize, Deserialize)]
struct MemberRow {
    name: String,
    email: String,
    timestamp: String,
    group: String,
}

impl MemberRow {
    fn from_member(member: &Member, absent_group: AbsentGroup) -> Self {
        Self {
            name: member.name().to_string(),
            email: member.email().to_string(),
            timestamp: member.created_at().to_string(),
            group: member
                .gym()
                .unwrap_or_else(|| absent_group.marker())
                .to_string(),
        }
    }

    fn into_member(self, absent_group: AbsentGroup) -> Result<Member, UserValidationError> {
        let user = User::restore(self.name, self.email, self.timestamp)?;
        if self.group == absent_group.marker() {
            Ok(Member::Regular(user))
        } else {
            Ok(Member::GymBro {
                user,
                gym: self.group,
            })
        }
    }
}
