use colored::*;
use indicatif::ProgressStyle;
use tracing::{Span, info};
use tracing_indicatif::span_ext::IndicatifSpanExt;
use v6lookup_common::models::{Progress, RunStats};

use crate::terminal::colors;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

pub fn bar_style() -> anyhow::Result<ProgressStyle> {
    let style = ProgressStyle::with_template(
        "{spinner:.blue} {msg} [{bar:32.green/bright_black}] {pos}/{len}",
    )?
    .tick_strings(TICKS)
    .progress_chars("━╸─");
    Ok(style)
}

/// Attaches a bar of `total` steps to `span`.
pub fn prepare(span: &Span, total: usize) -> anyhow::Result<()> {
    span.pb_set_style(&bar_style()?);
    span.pb_set_length(total as u64);
    span.pb_set_message("resolving");
    Ok(())
}

pub fn format_progress(progress: &Progress) -> String {
    format!(
        "Processed: {:.1}% - Found: {} IPv6 addresses",
        progress.percent(),
        progress.found
    )
}

/// Moves the bar and, unless `quiet`, logs a progress line.
pub fn report(span: &Span, progress: Progress, quiet: bool) {
    span.pb_set_position(progress.processed as u64);
    span.pb_set_message(&format!("{} found", progress.found.to_string().color(colors::ACCENT)));
    if !quiet {
        info!("{}", format_progress(&progress));
    }
}

/// Snaps the bar to the final count once the run is over.
pub fn finish(span: &Span, stats: &RunStats) {
    report(span, stats.as_progress(), true);
}
