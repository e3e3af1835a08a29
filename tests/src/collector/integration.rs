use std::fs;
use std::sync::Arc;

use netgrid_common::config::{Config, DataSource};
use netgrid_common::network::interface::{InterfaceFlags, InterfaceType, LinkState};
use netgrid_core::filter::ExclusionFilter;
use netgrid_core::mock::MockSource;
use netgrid_core::vendors::VendorResolver;
use netgrid_core::Collector;

use crate::support::{collector, online_resolver, CountingSource, Facts};

/*************************************************************
                     Single-interface passes
**************************************************************/

#[tokio::test]
async fn eth0_is_enriched_with_one_remote_call() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vendors.json");
    let source = CountingSource::knowing(&[("AA:BB:CC", "Acme Networks")]);

    let eth0 = Facts::new("eth0", 2)
        .up()
        .mac("aa:bb:cc:11:22:33")
        .speed(1000)
        .addr("192.168.1.5/24")
        .build();
    let collection = collector(vec![eth0], online_resolver(&path, source.clone()))
        .collect()
        .await
        .unwrap();

    let eth0 = collection.get("eth0").unwrap();
    assert_eq!(eth0.link_state, LinkState::Up);
    assert_eq!(eth0.speed_mbps, Some(1000));
    assert_eq!(eth0.interface_type, InterfaceType::Physical);
    assert_eq!(eth0.vendor.as_deref(), Some("Acme Networks"));
    assert_eq!(source.calls(), 1);

    let on_disk: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(on_disk["entries"]["AA:BB:CC"]["vendor_name"], "Acme Networks");
}

#[tokio::test]
async fn veth_is_filtered_from_collect_but_returned_by_collect_one() {
    let dir = tempfile::tempdir().unwrap();
    let source = CountingSource::knowing(&[("02:42:AC", "Container")]);
    let facts = vec![
        Facts::new("eth0", 2).up().mac("aa:bb:cc:11:22:33").build(),
        Facts::new("veth3f2a1", 7).up().mac("02:42:ac:11:00:02").build(),
    ];
    let collector = collector(facts, online_resolver(&dir.path().join("v.json"), source.clone()));

    let collection = collector.collect().await.unwrap();
    assert_eq!(collection.names(), vec!["eth0"]);
    assert_eq!(source.calls(), 1, "excluded interfaces are never looked up");

    let veth = collector.collect_one("veth3f2a1").await.unwrap().unwrap();
    assert_eq!(veth.interface_type, InterfaceType::Virtual);
    assert_eq!(veth.vendor.as_deref(), Some("Container"));
}

#[tokio::test]
async fn disabled_lookup_leaves_vendors_and_cache_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vendors.json");
    let config = Config {
        vendor_lookup: false,
        cache_path: Some(path.clone()),
        data_source: DataSource::Mock { include_filtered: true },
        ..Config::default()
    };

    let collector = Collector::from_config(&config);
    let collection = collector.collect().await.unwrap();
    assert!(!collection.is_empty());
    assert!(collection.iter().all(|i| i.vendor.is_none()));
    assert!(collector.collect_one("eth0").await.unwrap().unwrap().vendor.is_none());
    assert!(!path.exists());

    // An existing file is not rewritten either.
    fs::write(&path, b"{\"version\":1,\"entries\":{}}").unwrap();
    let before = fs::metadata(&path).unwrap().modified().unwrap();
    Collector::from_config(&config).collect().await.unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"{\"version\":1,\"entries\":{}}");
    assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
}

#[tokio::test]
async fn unwritable_cache_keeps_the_pass_alive() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, b"not a directory").unwrap();
    let source = CountingSource::knowing(&[("AA:BB:CC", "Acme")]);

    let eth0 = Facts::new("eth0", 2).up().mac("aa:bb:cc:11:22:33").build();
    let collection = collector(vec![eth0], online_resolver(&blocker.join("v.json"), source.clone()))
        .collect()
        .await
        .unwrap();

    assert_eq!(collection.get("eth0").unwrap().vendor.as_deref(), Some("Acme"));
    assert_eq!(source.calls(), 1);
    assert!(blocker.is_file());
}

/*************************************************************
                   Properties across passes
**************************************************************/

#[tokio::test]
async fn warm_cache_passes_are_identical_and_free() {
    let dir = tempfile::tempdir().unwrap();
    let source = CountingSource::knowing(&[("52:54:00", "QEMU"), ("08:00:27", "PCS Systemtechnik")]);
    let collector = Collector::new(
        Arc::new(MockSource::new(false)),
        ExclusionFilter::default(),
        online_resolver(&dir.path().join("v.json"), source.clone()),
    );

    let first = collector.collect().await.unwrap();
    let calls_after_first = source.calls();
    let second = collector.collect().await.unwrap();

    assert_eq!(source.calls(), calls_after_first);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn shared_oui_across_interfaces_costs_one_call() {
    let dir = tempfile::tempdir().unwrap();
    let source = CountingSource::knowing(&[("08:00:27", "PCS Systemtechnik")]);
    let facts = vec![
        Facts::new("eth1", 2).up().mac("08:00:27:ab:cd:ef").build(),
        Facts::new("enp0s3", 3).up().mac("08:00:27:44:55:66").build(),
        Facts::new("enp0s8", 4).mac("08:00:27:77:88:99").build(),
    ];

    let collection = collector(facts, online_resolver(&dir.path().join("v.json"), source.clone()))
        .collect()
        .await
        .unwrap();

    assert_eq!(source.calls(), 1);
    assert!(collection
        .iter()
        .all(|i| i.vendor.as_deref() == Some("PCS Systemtechnik")));
}

#[tokio::test]
async fn loopback_survives_the_default_filter() {
    let lo = Facts::new("lo", 1)
        .flags(InterfaceFlags::UP | InterfaceFlags::LOOPBACK | InterfaceFlags::RUNNING)
        .addr("127.0.0.1/8")
        .build();
    let collection = collector(vec![lo], VendorResolver::disabled()).collect().await.unwrap();

    let lo = collection.get("lo").unwrap();
    assert_eq!(lo.interface_type, InterfaceType::Loopback);
    assert_eq!(lo.link_state, LinkState::Up);
    assert!(lo.mac.is_none());
}

#[tokio::test]
async fn output_follows_probe_order() {
    let facts = vec![
        Facts::new("lo", 1).build(),
        Facts::new("wlan0", 2).build(),
        Facts::new("eth0", 3).build(),
    ];
    let collection = collector(facts, VendorResolver::disabled()).collect().await.unwrap();
    assert_eq!(collection.names(), vec!["lo", "wlan0", "eth0"]);
}

#[tokio::test]
async fn mock_source_exercises_every_type() {
    let config = Config {
        vendor_lookup: false,
        data_source: DataSource::Mock { include_filtered: true },
        ..Config::default()
    };
    let collector = Collector::from_config(&config);
    let collection = collector.collect().await.unwrap();

    for kind in [
        InterfaceType::Physical,
        InterfaceType::Wireless,
        InterfaceType::Virtual,
        InterfaceType::Loopback,
    ] {
        assert!(!collection.filter_by_type(kind).is_empty(), "no {kind} interface");
    }
    for filtered in ["veth0abc123", "br-docker0", "tailscale0"] {
        assert!(collection.get(filtered).is_none());
        assert!(collector.collect_one(filtered).await.unwrap().is_some());
    }
}
