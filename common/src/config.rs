use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_INPUT: &str = "list.ipv4";
pub const DEFAULT_OUTPUT: &str = "list.ipv6";
pub const DEFAULT_WORKERS: usize = 20;

pub struct Config {
    /// Text file with one IPv4 address per line.
    pub input: PathBuf,
    /// Destination for the resolved IPv6 addresses, truncated on every run.
    pub output: PathBuf,
    /// Maximum number of resolutions in flight at once.
    pub workers: usize,
    /// Upper bound for a single DNS call.
    ///
    /// `None` leaves it to the system resolver's own timeout. An expired call
    /// is only abandoned: its blocking thread runs until the resolver answers.
    pub timeout: Option<Duration>,
    pub no_banner: bool,
    /// 0 prints everything, 1 hides banner and progress, 2 also hides the summary.
    pub quiet: u8,
}

impl Config {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            workers: self.workers,
            timeout: self.timeout,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            workers: DEFAULT_WORKERS,
            timeout: None,
            no_banner: false,
            quiet: 0,
        }
    }
}

/// Knobs the resolution engine cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub workers: usize,
    pub timeout: Option<Duration>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            timeout: None,
        }
    }
}
