pub mod lookup;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use v6lookup_common::config::{Config, DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_WORKERS};

const MAX_WORKERS: usize = 1024;

#[derive(Parser)]
#[command(name = "v6lookup", version)]
#[command(about = "Find the IPv6 addresses behind a list of IPv4 addresses.")]
pub struct CommandLine {
    /// File with one IPv4 address per line, '#' starts a comment
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Where to write the resolved IPv6 addresses
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Number of lookups in flight at once
    #[arg(short, long, default_value_t = DEFAULT_WORKERS, value_parser = parse_workers)]
    pub workers: usize,

    /// Give up on a single DNS call after this many milliseconds.
    /// The abandoned lookup still occupies a blocking thread until the system
    /// resolver returns, so an unresponsive resolver can hold more threads than
    /// --workers
    #[arg(short, long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Print less; repeat to print only errors
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Skip the banner
    #[arg(long)]
    pub no_banner: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn into_config(self) -> Config {
        Config {
            input: self.input,
            output: self.output,
            workers: self.workers,
            timeout: self.timeout.map(Duration::from_millis),
            no_banner: self.no_banner,
            quiet: self.quiet,
        }
    }
}

fn parse_workers(s: &str) -> Result<usize, String> {
    let workers: usize = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if !(1..=MAX_WORKERS).contains(&workers) {
        return Err(format!("workers must be between 1 and {MAX_WORKERS}"));
    }
    Ok(workers)
}
