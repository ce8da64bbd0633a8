//! Interactive roster CLI.
//!
//! # Responsibility
//! - Parse flags and environment configuration.
//! - Wire logging, the CSV store and the system clock into one session.

mod session;

use anyhow::{anyhow, Result};
use chestbrah_core::{
    default_log_level, init_logging, AbsentGroup, CsvMemberStore, RosterService, StoreOptions,
    SystemClock, DEFAULT_STORE_FILE,
};
use clap::Parser;
use std::path::PathBuf;

/// Collect gym bros, save them to CSV and read them back.
#[derive(Debug, Parser)]
#[command(name = "chestbrah", version)]
struct Args {
    /// Roster file to overwrite and reload.
    #[arg(long, env = "CHESTBRAH_FILE", default_value = DEFAULT_STORE_FILE)]
    file: PathBuf,

    /// Log level (trace|debug|info|warn|error). Defaults by build mode.
    /// Only meaningful together with `--log-dir`.
    #[arg(long, env = "CHESTBRAH_LOG_LEVEL", requires = "log_dir")]
    log_level: Option<String>,

    /// Directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "CHESTBRAH_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Write an empty group column for members without a gym instead of `N/A`.
    #[arg(long)]
    blank_absent_group: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_dir) = &args.log_dir {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| anyhow!(err))?;
    }

    let options = StoreOptions {
        absent_group: if args.blank_absent_group {
            AbsentGroup::Blank
        } else {
            AbsentGroup::Sentinel
        },
    };
    let store = CsvMemberStore::with_options(args.file, options);
    let mut service = RosterService::new(store, SystemClock);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    session::run_session(&mut stdin.lock(), &mut stdout.lock(), &mut service)
}
