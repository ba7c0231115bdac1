use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;
use v6lookup_common::error::LookupError;
use v6lookup_common::models::Candidate;

const COMMENT_PREFIX: char = '#';

/// Reads the candidate list from `path`.
///
/// Blank lines and lines starting with `#` (after trimming) are skipped.
/// Returns [`LookupError::EmptyInput`] when nothing is left.
pub fn load(path: &Path) -> Result<Vec<Candidate>, LookupError> {
    let file: File = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LookupError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => LookupError::InputRead {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let candidates: Vec<Candidate> =
        parse(BufReader::new(file)).map_err(|source| LookupError::InputRead {
            path: path.to_path_buf(),
            source,
        })?;

    if candidates.is_empty() {
        return Err(LookupError::EmptyInput {
            path: path.to_path_buf(),
        });
    }

    debug!("loaded {} candidates from {}", candidates.len(), path.display());
    Ok(candidates)
}

/// Same filtering as [`load`], over any buffered reader. Order is preserved.
pub fn parse<R: BufRead>(reader: R) -> io::Result<Vec<Candidate>> {
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut skipped: usize = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line: String = line?;
        let trimmed: &str = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
            skipped += 1;
            continue;
        }
        candidates.push(Candidate::new(trimmed, idx + 1));
    }

    debug!("skipped {skipped} blank or comment lines");
    Ok(candidates)
}
