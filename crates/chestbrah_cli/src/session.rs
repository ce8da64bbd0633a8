//! Interactive roster session.
//!
//! # Responsibility
//! - Collect members from line-oriented prompts until `exit` or EOF.
//! - Save the session, reload it and print every reloaded member.
//!
//! # Invariants
//! - Both blank names and invalid emails are re-prompted; neither aborts
//!   the session.

use anyhow::{Context, Result};
use chestbrah_core::{
    email_is_valid, zyzz_greeting, Clock, CsvMemberStore, MemberStore, RosterService,
    UserValidationError,
};
use log::info;
use std::io::{BufRead, Write};

const NAME_PROMPT: &str = "Enter your name brah? ";
const EMAIL_PROMPT: &str = "What's your email brah? ";
const GYM_PROMPT: &str = "What gym do you rep? or if you don't rep dont say anything ";
const EXIT_COMMAND: &str = "exit";
const MISSING_NAME_MESSAGE: &str = "Missing name. Try again.";
const INVALID_EMAIL_MESSAGE: &str = "Invalid email format. Try again.";

/// Runs the full prompt, save, reload and print flow.
pub fn run_session<R, W, C>(
    input: &mut R,
    output: &mut W,
    service: &mut RosterService<CsvMemberStore, C>,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    C: Clock,
{
    writeln!(output, "{}", zyzz_greeting("GymBro"))?;
    collect_members(input, output, service)?;

    let path = service.store().path().display().to_string();
    let saved = service
        .persist()
        .with_context(|| format!("failed to save users to `{path}`"))?;
    info!("event=session_saved module=cli status=ok rows={saved}");
    writeln!(output, "All users saved to '{path}'.")?;

    writeln!(output, "Loading users from file:")?;
    let outcome = service
        .reload()
        .with_context(|| format!("failed to load users from `{path}`"))?;
    if !outcome.source_found {
        writeln!(output, "No gains yet, file {path} not found.")?;
    }
    for member in &outcome.members {
        writeln!(output, "{}", member.describe())?;
    }
    Ok(())
}

/// Reads members until the exit command or end of input.
///
/// Returns the number of members added in this call.
pub fn collect_members<R, W, S, C>(
    input: &mut R,
    output: &mut W,
    service: &mut RosterService<S, C>,
) -> Result<usize>
where
    R: BufRead,
    W: Write,
    S: MemberStore,
    C: Clock,
{
    let mut added = 0;
    loop {
        let Some(name) = prompt(input, output, NAME_PROMPT)? else {
            break;
        };
        if name.eq_ignore_ascii_case(EXIT_COMMAND) {
            break;
        }
        if name.is_empty() {
            writeln!(output, "{MISSING_NAME_MESSAGE}")?;
            continue;
        }

        let Some(email) = prompt(input, output, EMAIL_PROMPT)? else {
            break;
        };
        if !email_is_valid(&email) {
            writeln!(output, "{INVALID_EMAIL_MESSAGE}")?;
            continue;
        }

        let gym = prompt(input, output, GYM_PROMPT)?.unwrap_or_default();
        match service.enroll(&name, &email, Some(&gym)) {
            Ok(member) => {
                writeln!(output, "Added {}.", member.describe())?;
                added += 1;
            }
            Err(UserValidationError::MissingName) => {
                writeln!(output, "{MISSING_NAME_MESSAGE}")?;
            }
            Err(UserValidationError::InvalidEmail(_)) => {
                writeln!(output, "{INVALID_EMAIL_MESSAGE}")?;
            }
        }
    }
    Ok(added)
}

/// Writes `label`, then reads one trimmed line. `None` means end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("failed to read prompt input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
