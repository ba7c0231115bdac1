use std::collections::BTreeSet;
use std::fs;
use std::net::Ipv6Addr;
use std::sync::Arc;

use v6lookup_common::config::RunOptions;
use v6lookup_common::error::LookupError;
use v6lookup_core::engine;
use v6lookup_core::{loader, writer};

use crate::util::{ScriptedDns, twenty_five_line_fixture};

fn opts(workers: usize) -> RunOptions {
    RunOptions {
        workers,
        timeout: None,
    }
}

/// Load, resolve and write: the output holds exactly the found addresses.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn full_run_over_twenty_five_lines() {
    let dir = tempfile::tempdir().unwrap();
    let (input, dns) = twenty_five_line_fixture(dir.path());
    let output = dir.path().join("list.ipv6");

    let candidates = loader::load(&input).unwrap();
    assert_eq!(candidates.len(), 20);
    assert!(candidates.iter().all(|c| !c.addr.starts_with('#') && c.addr == c.addr.trim()));
    assert_eq!(candidates[0].addr, "203.0.113.1");
    assert_eq!(candidates[19].addr, "203.0.113.20");

    let report = engine::run(Arc::new(dns), candidates, opts(20), None).await;
    assert_eq!(report.stats.processed, 20);
    assert_eq!(report.stats.found, 12);

    writer::write(&output, &report.addresses).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), report.stats.found);
    for line in lines {
        assert!(line.parse::<Ipv6Addr>().is_ok(), "not an IPv6 address: {line}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn one_worker_and_fifty_workers_agree() {
    let dir = tempfile::tempdir().unwrap();
    let (input, dns) = twenty_five_line_fixture(dir.path());
    let dns = Arc::new(dns);
    let candidates = loader::load(&input).unwrap();

    let serial = engine::run(dns.clone(), candidates.clone(), opts(1), None).await;
    let wide = engine::run(dns, candidates, opts(50), None).await;

    assert_eq!(serial.stats.found, wide.stats.found);
    assert_eq!(serial.stats.processed, wide.stats.processed);

    let serial_set: BTreeSet<Ipv6Addr> = serial.addresses.into_iter().collect();
    let wide_set: BTreeSet<Ipv6Addr> = wide.addresses.into_iter().collect();
    assert_eq!(serial_set, wide_set);
}

#[tokio::test]
async fn reruns_are_stable() {
    let dir = tempfile::tempdir().unwrap();
    let (input, dns) = twenty_five_line_fixture(dir.path());
    let dns = Arc::new(dns);

    let first = engine::run(dns.clone(), loader::load(&input).unwrap(), opts(5), None).await;
    let second = engine::run(dns, loader::load(&input).unwrap(), opts(5), None).await;

    assert_eq!(first.stats.found, second.stats.found);
    let a: BTreeSet<Ipv6Addr> = first.addresses.into_iter().collect();
    let b: BTreeSet<Ipv6Addr> = second.addresses.into_iter().collect();
    assert_eq!(a, b);
}

#[test]
fn all_comment_input_leaves_output_alone() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("list.ipv4");
    let output = dir.path().join("list.ipv6");
    fs::write(&input, "# nothing here\n\n   \n# still nothing\n").unwrap();
    fs::write(&output, "2001:db8::1\n").unwrap();

    let err = loader::load(&input).unwrap_err();
    assert!(matches!(err, LookupError::EmptyInput { .. }));
    assert!(!err.is_failure());
    assert_eq!(fs::read_to_string(&output).unwrap(), "2001:db8::1\n");
}

#[test]
fn empty_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("list.ipv4");
    fs::write(&input, "").unwrap();

    assert!(matches!(
        loader::load(&input),
        Err(LookupError::EmptyInput { .. })
    ));
    assert!(!dir.path().join("list.ipv6").exists());
}

#[test]
fn missing_input_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.ipv4");

    let err = loader::load(&input).unwrap_err();
    assert!(matches!(err, LookupError::InputNotFound { .. }));
    assert!(err.is_failure());
    assert!(err.to_string().contains("missing.ipv4"));
}

#[tokio::test]
async fn nothing_resolves() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("list.ipv4");
    let output = dir.path().join("list.ipv6");
    fs::write(&input, "192.0.2.1\n192.0.2.2\nbogus\n").unwrap();

    let report = engine::run(
        Arc::new(ScriptedDns::default()),
        loader::load(&input).unwrap(),
        opts(2),
        None,
    )
    .await;
    assert_eq!(report.stats.processed, 3);
    assert_eq!(report.stats.found, 0);
    assert_eq!(report.stats.success_rate(), 0.0);

    writer::write(&output, &report.addresses).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}
