use std::net::Ipv6Addr;
use std::sync::Arc;

use colored::*;
use tracing::{Instrument, Span, info_span, warn};
use v6lookup_common::config::Config;
use v6lookup_common::error::LookupError;
use v6lookup_common::models::{Candidate, Progress, RunStats};
use v6lookup_core::engine::{self, ProgressCallback, RunReport};
use v6lookup_core::resolver::SystemDns;
use v6lookup_core::{loader, writer};

use crate::terminal::{colors, format, print, progress};
use crate::vprint;

/// Loads the input, resolves every candidate and writes the results.
///
/// An input without candidates is reported and treated as success.
pub async fn lookup(cfg: &Config) -> anyhow::Result<()> {
    let candidates: Vec<Candidate> = match loader::load(&cfg.input) {
        Ok(candidates) => candidates,
        Err(e @ LookupError::EmptyInput { .. }) => {
            warn!("{e}, nothing to do");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if cfg.quiet < 2 {
        print::print_status(format!(
            "Processing {} IPv4 addresses with {} workers",
            candidates.len().to_string().color(colors::ACCENT),
            cfg.workers
        ));
    }

    let span: Span = match cfg.quiet {
        0 => info_span!("resolution", indicatif.pb_show = true),
        _ => info_span!("resolution"),
    };
    progress::prepare(&span, candidates.len())?;

    let bar_span: Span = span.clone();
    let final_span: Span = span.clone();
    let quiet: bool = cfg.quiet > 0;
    let on_progress: ProgressCallback =
        Arc::new(move |p: Progress| progress::report(&bar_span, p, quiet));

    let report: RunReport = engine::run(
        Arc::new(SystemDns),
        candidates,
        cfg.run_options(),
        Some(on_progress),
    )
    .instrument(span)
    .await;
    progress::finish(&final_span, &report.stats);

    if cfg.quiet < 2 {
        print_summary(&report, cfg);
    }

    writer::write(&cfg.output, &report.addresses)?;

    if cfg.quiet < 2 {
        print::aligned_line(
            "Results saved",
            cfg.output.display().to_string().color(colors::PRIMARY),
        );
    }
    Ok(())
}

fn print_summary(report: &RunReport, cfg: &Config) {
    let stats: &RunStats = &report.stats;

    vprint!();
    print::header("lookup complete", cfg.quiet);
    print::aligned_line("Elapsed", format!("{:.2}s", stats.elapsed.as_secs_f64()).bold().yellow());
    print::aligned_line("Processed", stats.processed.to_string());
    print::aligned_line("IPv6 found", stats.found.to_string().bold().green());
    print::aligned_line("Success rate", format!("{:.1}%", stats.success_rate()));
    print_breakdown(&report.addresses);

    if cfg.quiet == 0 {
        print::fat_separator();
        let line: String = format!(
            "{} of {} addresses resolved to IPv6",
            stats.found, stats.processed
        );
        print::centerln(&line);
    }
}

fn print_breakdown(addresses: &[Ipv6Addr]) {
    if addresses.is_empty() {
        return;
    }
    print::as_tree_one_level(format::type_breakdown(addresses));
}
