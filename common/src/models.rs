use std::fmt;
use std::net::Ipv6Addr;
use std::time::Duration;

/// One non-comment line of the input file, trimmed but otherwise unchecked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub addr: String,
    /// 1-based line number in the source file.
    pub line: usize,
}

impl Candidate {
    pub fn new(addr: impl Into<String>, line: usize) -> Self {
        Self {
            addr: addr.into(),
            line,
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.addr)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Resolved(Ipv6Addr),
    Unresolved,
}

impl Outcome {
    pub fn address(&self) -> Option<Ipv6Addr> {
        match self {
            Outcome::Resolved(addr) => Some(*addr),
            Outcome::Unresolved => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub processed: usize,
    pub found: usize,
    pub elapsed: Duration,
}

impl RunStats {
    /// Found over processed, as a percentage. Zero when nothing was processed.
    pub fn success_rate(&self) -> f64 {
        if self.processed == 0 {
            return 0.0;
        }
        self.found as f64 / self.processed as f64 * 100.0
    }

    /// Progress of a finished run: everything processed.
    pub fn as_progress(&self) -> Progress {
        Progress {
            processed: self.processed,
            found: self.found,
            total: self.processed,
        }
    }
}

/// Counters captured at one instant of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: usize,
    pub found: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.processed as f64 / self.total as f64 * 100.0
    }
}
