use std::ffi::OsString;
use std::path::PathBuf;

use clap::{value_parser, Arg, Command};

pub const DEFAULT_DIR: &str = ".sprintboard";
const LOG_FILE_NAME: &str = "sprintboard.log";

/// Runtime settings gathered from the command line and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the on-disk store.
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
}

impl Config {
    pub fn command() -> Command {
        Command::new("sprintboard")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Terminal kanban board for sprint work items")
            .arg(
                Arg::new("dir")
                    .long("dir")
                    .env("SPRINTBOARD_DIR")
                    .value_parser(value_parser!(PathBuf))
                    .default_value(DEFAULT_DIR)
                    .help("Directory holding work items and sprints"),
            )
            .arg(
                Arg::new("log-file")
                    .long("log-file")
                    .value_parser(value_parser!(PathBuf))
                    .help("Log destination [default: <dir>/sprintboard.log]"),
            )
    }

    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        let data_dir = matches
            .get_one::<PathBuf>("dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR));
        let log_file = matches
            .get_one::<PathBuf>("log-file")
            .cloned()
            .unwrap_or_else(|| data_dir.join(LOG_FILE_NAME));
        Ok(Self { data_dir, log_file })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
