//! The concurrent resolution loop.
//!
//! Every candidate gets its own task; a [`Semaphore`] caps how many are
//! resolving at once. Finished tasks commit their [`Outcome`] into one shared
//! tally, and counters and results only ever change together under its lock.

use std::collections::HashMap;
use std::net::Ipv6Addr;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::{Id, JoinSet};
use tracing::{debug, error};
use v6lookup_common::config::RunOptions;
use v6lookup_common::models::{Candidate, Outcome, Progress, RunStats};

use crate::resolver::{self, DnsBackend};

/// Progress is reported after every this many completions.
pub const PROGRESS_INTERVAL: usize = 10;

pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

#[derive(Debug, Default)]
pub struct RunReport {
    /// Resolved addresses in completion order.
    pub addresses: Vec<Ipv6Addr>,
    pub stats: RunStats,
}

struct Tally {
    total: usize,
    processed: usize,
    found: usize,
    addresses: Vec<Ipv6Addr>,
}

impl Tally {
    fn new(total: usize) -> Self {
        Self {
            total,
            processed: 0,
            found: 0,
            addresses: Vec::new(),
        }
    }

    /// Records one finished candidate. Returns a snapshot on every
    /// [`PROGRESS_INTERVAL`]th completion.
    fn commit(&mut self, outcome: Outcome) -> Option<Progress> {
        self.processed += 1;
        if let Some(addr) = outcome.address() {
            self.found += 1;
            self.addresses.push(addr);
        }

        (self.processed % PROGRESS_INTERVAL == 0).then_some(Progress {
            processed: self.processed,
            found: self.found,
            total: self.total,
        })
    }
}

/// Commits `outcome` and, when due, reports progress while still holding the lock.
fn commit(tally: &Mutex<Tally>, outcome: Outcome, on_progress: Option<&ProgressCallback>) {
    let mut tally = tally.lock().unwrap_or_else(PoisonError::into_inner);
    let Some(progress) = tally.commit(outcome) else {
        return;
    };

    debug!(
        "processed {}/{} - found {}",
        progress.processed, progress.total, progress.found
    );
    if let Some(callback) = on_progress
        && panic::catch_unwind(AssertUnwindSafe(|| callback(progress))).is_err()
    {
        error!("progress callback panicked at {}/{}", progress.processed, progress.total);
    }
}

/// Resolves all `candidates` with at most `opts.workers` lookups in flight.
///
/// Waits for every task before returning. A task that dies unexpectedly is
/// logged and counted as processed but unresolved; the rest of the batch
/// carries on.
pub async fn run(
    backend: Arc<dyn DnsBackend>,
    candidates: Vec<Candidate>,
    opts: RunOptions,
    on_progress: Option<ProgressCallback>,
) -> RunReport {
    let total: usize = candidates.len();
    let workers: usize = opts.workers.max(1);
    let semaphore: Arc<Semaphore> = Arc::new(Semaphore::new(workers));
    let tally: Arc<Mutex<Tally>> = Arc::new(Mutex::new(Tally::new(total)));

    debug!("resolving {total} candidates with {workers} workers");

    let start_time: Instant = Instant::now();
    let mut tasks: JoinSet<()> = JoinSet::new();
    let mut in_flight: HashMap<Id, Candidate> = HashMap::with_capacity(total);

    for candidate in candidates {
        let backend = backend.clone();
        let semaphore = semaphore.clone();
        let tally = tally.clone();
        let on_progress = on_progress.clone();
        let addr: String = candidate.addr.clone();

        let handle = tasks.spawn(async move {
            let outcome: Outcome = match semaphore.acquire_owned().await {
                Ok(_permit) => resolver::resolve(backend.as_ref(), &addr, opts.timeout).await,
                Err(e) => {
                    error!("worker pool closed before {addr} could run: {e}");
                    Outcome::Unresolved
                }
            };
            commit(&tally, outcome, on_progress.as_ref());
        });
        in_flight.insert(handle.id(), candidate);
    }

    while let Some(joined) = tasks.join_next_with_id().await {
        match joined {
            Ok((id, ())) => {
                in_flight.remove(&id);
            }
            Err(e) => {
                let candidate: Option<Candidate> = in_flight.remove(&e.id());
                match candidate {
                    Some(c) => error!("error processing {c} (line {}): {e}", c.line),
                    None => error!("error processing address: {e}"),
                }
                commit(&tally, Outcome::Unresolved, on_progress.as_ref());
            }
        }
    }

    let elapsed = start_time.elapsed();
    let mut tally = tally.lock().unwrap_or_else(PoisonError::into_inner);

    RunReport {
        addresses: std::mem::take(&mut tally.addresses),
        stats: RunStats {
            processed: tally.processed,
            found: tally.found,
            elapsed,
        },
    }
}
