use std::collections::HashMap;
use std::io::Write;
use std::net::Ipv6Addr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use v6lookup_core::resolver::DnsBackend;

/// DNS answers from a fixed table, with a small latency that varies per
/// address so completion order differs from input order.
#[derive(Default)]
pub struct ScriptedDns {
    ptr: HashMap<String, String>,
    aaaa: HashMap<String, Vec<Ipv6Addr>>,
}

impl ScriptedDns {
    pub fn host(mut self, ipv4: &str, hostname: &str, addrs: &[Ipv6Addr]) -> Self {
        self.ptr.insert(ipv4.to_string(), hostname.to_string());
        self.aaaa.insert(hostname.to_string(), addrs.to_vec());
        self
    }
}

fn jitter(key: &str) -> Duration {
    let sum: u64 = key.bytes().map(u64::from).sum();
    Duration::from_micros(sum % 7 * 300)
}

#[async_trait]
impl DnsBackend for ScriptedDns {
    async fn reverse(&self, addr: &str) -> anyhow::Result<String> {
        tokio::time::sleep(jitter(addr)).await;
        self.ptr
            .get(addr)
            .cloned()
            .ok_or_else(|| anyhow!("no PTR for {addr}"))
    }

    async fn forward_v6(&self, hostname: &str) -> anyhow::Result<Vec<Ipv6Addr>> {
        tokio::time::sleep(jitter(hostname)).await;
        self.aaaa
            .get(hostname)
            .cloned()
            .ok_or_else(|| anyhow!("no AAAA for {hostname}"))
    }
}

/// 25 lines: 20 addresses, 3 comments, 2 blanks. The first 12 addresses have
/// PTR and AAAA records.
pub fn twenty_five_line_fixture(dir: &Path) -> (PathBuf, ScriptedDns) {
    let path: PathBuf = dir.join("list.ipv4");
    let mut file = std::fs::File::create(&path).unwrap();
    let mut dns = ScriptedDns::default();

    writeln!(file, "# resolvers to check").unwrap();
    writeln!(file).unwrap();
    for i in 1..=20u16 {
        if i == 8 {
            writeln!(file, "   # second batch").unwrap();
        }
        if i == 15 {
            writeln!(file, "  ").unwrap();
        }
        let ipv4 = format!("203.0.113.{i}");
        writeln!(file, "  {ipv4}\t").unwrap();
        if i <= 12 {
            let host = format!("node{i}.example.net");
            let v6 = Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, i);
            dns = dns.host(&ipv4, &host, &[v6, v6]);
        }
    }
    writeln!(file, "# end").unwrap();

    (path, dns)
}
