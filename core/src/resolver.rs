//! Turns a single candidate into an [`Outcome`].
//!
//! Resolution is a two step chain: a PTR lookup maps the address to a hostname,
//! then an `AF_INET6` lookup maps the hostname to its AAAA records. DNS has no
//! direct IPv4 to IPv6 mapping, so the result depends entirely on what records
//! the resolver can see.

use std::collections::HashSet;
use std::future::Future;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, anyhow, ensure};
use async_trait::async_trait;
use dns_lookup::{AddrFamily, AddrInfoHints};
use tracing::trace;
use v6lookup_common::models::Outcome;

/// Where the DNS answers come from.
#[async_trait]
pub trait DnsBackend: Send + Sync {
    /// PTR lookup for `addr`.
    async fn reverse(&self, addr: &str) -> anyhow::Result<String>;

    /// Every IPv6 address the resolver returns for `hostname`, duplicates included.
    async fn forward_v6(&self, hostname: &str) -> anyhow::Result<Vec<Ipv6Addr>>;
}

/// Uses the operating system's resolver through `getnameinfo`/`getaddrinfo`.
///
/// Both calls block, so they run on tokio's blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDns;

#[async_trait]
impl DnsBackend for SystemDns {
    async fn reverse(&self, addr: &str) -> anyhow::Result<String> {
        let ip: IpAddr = addr
            .parse()
            .with_context(|| format!("'{addr}' is not an IP address"))?;

        let hostname: String =
            tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&ip)).await??;

        // getnameinfo falls back to the numeric form when there is no PTR record
        ensure!(hostname != ip.to_string(), "no PTR record for {ip}");
        Ok(hostname)
    }

    async fn forward_v6(&self, hostname: &str) -> anyhow::Result<Vec<Ipv6Addr>> {
        let hostname: String = hostname.to_owned();
        tokio::task::spawn_blocking(move || lookup_ipv6(&hostname)).await?
    }
}

fn lookup_ipv6(hostname: &str) -> anyhow::Result<Vec<Ipv6Addr>> {
    let hints = AddrInfoHints {
        address: AddrFamily::Inet6.into(),
        ..AddrInfoHints::default()
    };

    let infos = dns_lookup::getaddrinfo(Some(hostname), None, Some(hints))
        .map_err(|e| anyhow!("AAAA lookup for {hostname} failed: {e:?}"))?;

    let mut addrs: Vec<Ipv6Addr> = Vec::new();
    for info in infos {
        if let SocketAddr::V6(sock) = info?.sockaddr {
            addrs.push(*sock.ip());
        }
    }
    Ok(addrs)
}

/// Resolves `candidate` to the first IPv6 address of the host its PTR record names.
///
/// Any failure along the way, including an expired `timeout`, yields
/// [`Outcome::Unresolved`]; nothing is propagated.
pub async fn resolve(
    backend: &dyn DnsBackend,
    candidate: &str,
    timeout: Option<Duration>,
) -> Outcome {
    let hostname: String = match bounded(timeout, backend.reverse(candidate)).await {
        Ok(hostname) => hostname,
        Err(e) => {
            trace!("{candidate}: reverse lookup failed: {e:#}");
            return Outcome::Unresolved;
        }
    };

    let addrs: Vec<Ipv6Addr> = match bounded(timeout, backend.forward_v6(&hostname)).await {
        Ok(addrs) => dedup_first_seen(addrs),
        Err(e) => {
            trace!("{candidate}: forward lookup of {hostname} failed: {e:#}");
            return Outcome::Unresolved;
        }
    };

    match addrs.first() {
        Some(addr) => {
            trace!("{candidate} -> {hostname} -> {addr}");
            Outcome::Resolved(*addr)
        }
        None => {
            trace!("{candidate}: {hostname} has no AAAA records");
            Outcome::Unresolved
        }
    }
}

/// Only stops waiting: a `spawn_blocking` lookup behind `fut` keeps its
/// thread until the system resolver returns.
async fn bounded<T, F>(timeout: Option<Duration>, fut: F) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .with_context(|| format!("no answer within {}ms", limit.as_millis()))?,
        None => fut.await,
    }
}

/// Drops repeated addresses, keeping the order in which each was first seen.
pub fn dedup_first_seen(addrs: Vec<Ipv6Addr>) -> Vec<Ipv6Addr> {
    let mut seen: HashSet<Ipv6Addr> = HashSet::with_capacity(addrs.len());
    addrs.into_iter().filter(|addr| seen.insert(*addr)).collect()
}
