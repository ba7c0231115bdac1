mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, lookup};
use terminal::{logging, print};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    let cfg = commands.into_config();
    print::banner(cfg.no_banner, cfg.quiet);
    print::header("ipv4 to ipv6 lookup", cfg.quiet);

    match lookup::lookup(&cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
