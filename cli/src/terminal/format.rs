use std::collections::BTreeMap;
use std::net::Ipv6Addr;

use crate::terminal::colors;
use colored::*;

pub fn ipv6_to_type_str(ipv6_addr: &Ipv6Addr) -> &'static str {
    if is_global_unicast(ipv6_addr) {
        return "GUA";
    }
    if ipv6_addr.is_unique_local() {
        return "ULA";
    }
    if ipv6_addr.is_unicast_link_local() {
        return "LLA";
    }
    "IPv6"
}

// 2000::/3
fn is_global_unicast(ipv6_addr: &Ipv6Addr) -> bool {
    let first_byte = ipv6_addr.octets()[0];
    (0x20..=0x3F).contains(&first_byte)
}

/// Counts resolved addresses per kind, e.g. `("GUA", "12")`.
pub fn type_breakdown(addrs: &[Ipv6Addr]) -> Vec<(String, ColoredString)> {
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for addr in addrs {
        *counts.entry(ipv6_to_type_str(addr)).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(kind, count)| (kind.to_string(), count.to_string().color(colors::IPV6_ADDR)))
        .collect()
}
