use chrono::{TimeDelta, Utc};

use netgrid_common::network::mac::{MacAddress, OuiPrefix};
use netgrid_core::vendors::{CacheEntry, LookupMode, VendorCache, VendorResolver};

use crate::support::{online_resolver, CountingSource, THIRTY_DAYS};

fn mac(s: &str) -> MacAddress {
    s.parse().unwrap()
}

fn oui(s: &str) -> OuiPrefix {
    s.parse().unwrap()
}

fn seeded(path: &std::path::Path, prefix: &str, vendor: Option<&str>, age_days: i64) {
    let mut cache = VendorCache::load(path);
    cache.insert(
        oui(prefix),
        CacheEntry::new(vendor.map(str::to_string), Utc::now() - TimeDelta::days(age_days)),
    );
    cache.flush().unwrap();
}

#[tokio::test]
async fn entry_written_by_one_resolver_is_reused_by_the_next() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v.json");

    let first = CountingSource::knowing(&[("AA:BB:CC", "Acme")]);
    let resolved = online_resolver(&path, first.clone()).resolve(&mac("aa:bb:cc:00:00:01")).await;
    assert_eq!(resolved.as_deref(), Some("Acme"));
    assert_eq!(first.calls(), 1);

    let second = CountingSource::failing();
    let resolved = online_resolver(&path, second.clone()).resolve(&mac("aa:bb:cc:99:99:99")).await;
    assert_eq!(resolved.as_deref(), Some("Acme"));
    assert_eq!(second.calls(), 0);
}

#[tokio::test]
async fn fresh_negative_entry_suppresses_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v.json");
    seeded(&path, "DE:AD:BE", None, 3);

    let source = CountingSource::knowing(&[("DE:AD:BE", "Would Be Found")]);
    let resolved = online_resolver(&path, source.clone()).resolve(&mac("de:ad:be:ef:00:01")).await;
    assert_eq!(resolved, None);
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn stale_negative_entry_costs_exactly_one_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v.json");
    seeded(&path, "DE:AD:BE", None, 31);

    let source = CountingSource::knowing(&[("DE:AD:BE", "Found Later")]);
    let resolver = online_resolver(&path, source.clone());
    let batch = resolver
        .resolve_batch(&[mac("de:ad:be:ef:00:01"), mac("de:ad:be:ef:00:02")])
        .await;
    assert!(batch.values().all(|v| v.as_deref() == Some("Found Later")));
    assert_eq!(source.calls(), 1);

    let reloaded = VendorCache::load(&path);
    assert_eq!(
        reloaded.get(&oui("DE:AD:BE")).unwrap().vendor_name.as_deref(),
        Some("Found Later")
    );
}

#[tokio::test]
async fn failed_lookup_is_remembered_across_resolvers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v.json");

    let first = CountingSource::failing();
    assert_eq!(online_resolver(&path, first.clone()).resolve(&mac("12:34:56:00:00:01")).await, None);
    assert_eq!(first.calls(), 1);

    let second = CountingSource::failing();
    assert_eq!(online_resolver(&path, second.clone()).resolve(&mac("12:34:56:00:00:02")).await, None);
    assert_eq!(second.calls(), 0);
    assert_eq!(VendorCache::load(&path).stats().negative, 1);
}

#[tokio::test]
async fn offline_resolver_reads_but_never_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v.json");
    seeded(&path, "AA:BB:CC", Some("Acme"), 365);
    let before = std::fs::read(&path).unwrap();

    let source = CountingSource::failing();
    let resolver = VendorResolver::new(
        VendorCache::load(&path),
        source.clone(),
        LookupMode::Offline,
        THIRTY_DAYS,
        4,
    );
    let batch = resolver
        .resolve_batch(&[mac("aa:bb:cc:00:00:01"), mac("12:34:56:00:00:01")])
        .await;

    assert_eq!(batch[&mac("aa:bb:cc:00:00:01")].as_deref(), Some("Acme"));
    assert_eq!(batch[&mac("12:34:56:00:00:01")], None);
    assert_eq!(source.calls(), 1);
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[tokio::test]
async fn fallback_answer_is_cached_for_the_next_resolver() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v.json");

    let remote = CountingSource::failing();
    let bundled = CountingSource::knowing(&[("08:00:27", "PCS Systemtechnik")]);
    let resolver = online_resolver(&path, remote.clone()).with_fallback(bundled.clone());
    let resolved = resolver.resolve(&mac("08:00:27:ab:cd:ef")).await;
    assert_eq!(resolved.as_deref(), Some("PCS Systemtechnik"));
    assert_eq!((remote.calls(), bundled.calls()), (1, 1));

    let later = CountingSource::failing();
    let resolved = online_resolver(&path, later.clone()).resolve(&mac("08:00:27:00:00:01")).await;
    assert_eq!(resolved.as_deref(), Some("PCS Systemtechnik"));
    assert_eq!(later.calls(), 0);
    assert_eq!(VendorCache::load(&path).stats().negative, 0);
}
