use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::net::Ipv6Addr;
use std::path::Path;

use tracing::debug;
use v6lookup_common::error::LookupError;

/// Writes one address per line to `path`, replacing whatever was there.
///
/// A failure part way through can leave a truncated file behind.
pub fn write(path: &Path, addresses: &[Ipv6Addr]) -> Result<(), LookupError> {
    let to_err = |source: io::Error| LookupError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut out: BufWriter<File> = BufWriter::new(File::create(path).map_err(to_err)?);
    for addr in addresses {
        writeln!(out, "{addr}").map_err(to_err)?;
    }
    out.flush().map_err(to_err)?;

    debug!("wrote {} addresses to {}", addresses.len(), path.display());
    Ok(())
}
