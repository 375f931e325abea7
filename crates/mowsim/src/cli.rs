//! Command-line arguments, interactive commands and headless detection.

use std::ffi::OsStr;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;

/// Environment variable that forces headless mode when set to a truthy value.
pub const HEADLESS_ENV: &str = "MOWSIM_HEADLESS";

const DEFAULT_ROWS: i64 = 10;
const DEFAULT_COLS: i64 = 10;
const DEFAULT_TICK_MS: u64 = 1_000;

/// Command-line arguments for the mowsim terminal view.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Number of lawn rows. Values below 1 are treated as 1.
    #[arg(long, value_name = "ROWS", default_value_t = DEFAULT_ROWS, allow_negative_numbers = true)]
    pub rows: i64,
    /// Number of lawn columns. Values below 1 are treated as 1.
    #[arg(long, value_name = "COLUMNS", default_value_t = DEFAULT_COLS, allow_negative_numbers = true)]
    pub cols: i64,
    /// Milliseconds between mower steps.
    #[arg(
        long = "tick-ms",
        value_name = "MILLISECONDS",
        default_value_t = DEFAULT_TICK_MS,
        value_parser = clap::value_parser!(u64).range(1..=60_000)
    )]
    pub tick_ms: u64,
    /// Skip the lawn view and exit immediately.
    #[arg(long)]
    pub headless: bool,
    /// Wait for a `start` command instead of mowing right away.
    #[arg(long)]
    pub paused: bool,
}

impl CliArgs {
    /// Tick period selected on the command line.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Decide whether to run without the lawn view.
pub fn is_headless(forced: bool, stdout_is_terminal: bool, env: Option<&OsStr>) -> bool {
    forced || !stdout_is_terminal || env.is_some_and(env_flag_set)
}

fn env_flag_set(value: &OsStr) -> bool {
    let value = value.to_string_lossy();
    let value = value.trim();
    !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
}

/// One line of interactive input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start or resume mowing.
    Start,
    /// Pause mowing.
    Stop,
    /// Print the current phase message.
    Status,
    /// Leave the program.
    Quit,
}

/// An input line that is not a known command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown command {:?} (expected start, stop, status or quit)",
            self.0
        )
    }
}

impl std::error::Error for UnknownCommand {}

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" | "resume" => Ok(Self::Start),
            "stop" | "pause" => Ok(Self::Stop),
            "status" => Ok(Self::Status),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(UnknownCommand(s.trim().to_string())),
        }
    }
}
