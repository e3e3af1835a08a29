//! # Interface Normalizer
//!
//! Turns [`RawInterfaceFacts`] into the canonical [`NetworkInterface`] record.
//! Everything here is pure: the same facts always produce the same record.

use std::net::IpAddr;

use pnet::ipnetwork::IpNetwork;
use tracing::debug;

use netgrid_common::network::interface::{
    Duplex, InterfaceFlags, InterfaceType, LinkState, NetworkInterface,
};
use netgrid_common::network::mac::MacAddress;
use netgrid_common::network::raw::RawInterfaceFacts;
use netgrid_common::utils::interface::AddressFamilies;

const WIRELESS_PREFIXES: &[&str] = &["wlan", "wlp", "wlx", "wifi", "ath"];

const VIRTUAL_PREFIXES: &[&str] = &[
    "veth", "docker", "br", "virbr", "vnet", "tun", "tap", "tailscale", "wg", "zt", "vxlan",
    "bond", "team", "dummy", "cni", "flannel", "cali", "kube", "utun", "ppp", "gre", "sit",
    "ip6tnl",
];

const PHYSICAL_PREFIXES: &[&str] = &["eth", "en", "em", "ib"];

pub fn normalize(raw: RawInterfaceFacts) -> NetworkInterface {
    let flags = InterfaceFlags::from_bits(raw.flags);
    let interface_type = classify(&raw);
    let link_state = parse_link_state(raw.oper_state.as_deref(), flags);

    let speed_mbps = raw
        .speed
        .filter(|_| link_state == LinkState::Up)
        .filter(|mbps| *mbps > 0)
        .and_then(|mbps| u32::try_from(mbps).ok());

    let ip_addresses = parse_addresses(&raw.name, &raw.addresses);

    NetworkInterface {
        mac: parse_mac(&raw.name, raw.mac.as_deref()),
        ipv4_addresses: ip_addresses.ipv4_nets(),
        ipv6_addresses: ip_addresses.ipv6_nets(),
        ip_addresses,
        link_state,
        speed_mbps,
        mtu: raw.mtu.filter(|mtu| *mtu > 0),
        driver: raw.driver.filter(|driver| !driver.is_empty()),
        duplex: parse_duplex(raw.duplex.as_deref()),
        flags,
        interface_type,
        vendor: None,
        name: raw.name,
    }
}

/// Derives the interface type. First match wins; never fails.
pub fn classify(raw: &RawInterfaceFacts) -> InterfaceType {
    let name = raw.name.as_str();
    let flags = InterfaceFlags::from_bits(raw.flags);

    if is_loopback_name(name) || flags.is_loopback() {
        return InterfaceType::Loopback;
    }
    if raw.wireless || has_prefix(name, WIRELESS_PREFIXES) {
        return InterfaceType::Wireless;
    }
    if has_prefix(name, VIRTUAL_PREFIXES) || flags.is_point_to_point() {
        return InterfaceType::Virtual;
    }
    if has_prefix(name, PHYSICAL_PREFIXES) || raw.has_device {
        return InterfaceType::Physical;
    }
    InterfaceType::Unknown
}

/// Maps an operational-state string to [`LinkState`], falling back to the
/// `IFF_UP`/`IFF_RUNNING` bits when the string says nothing useful.
pub fn parse_link_state(oper_state: Option<&str>, flags: InterfaceFlags) -> LinkState {
    match oper_state.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("up") => LinkState::Up,
        Some("down" | "lowerlayerdown" | "notpresent" | "dormant") => LinkState::Down,
        _ => {
            if flags.contains(InterfaceFlags::UP | InterfaceFlags::RUNNING) {
                LinkState::Up
            } else if flags.bits() != 0 && !flags.contains(InterfaceFlags::UP) {
                LinkState::Down
            } else {
                LinkState::Unknown
            }
        }
    }
}

fn parse_duplex(duplex: Option<&str>) -> Duplex {
    match duplex.map(|d| d.trim().to_ascii_lowercase()).as_deref() {
        Some("full") => Duplex::Full,
        Some("half") => Duplex::Half,
        _ => Duplex::Unknown,
    }
}

fn parse_mac(name: &str, raw: Option<&str>) -> Option<MacAddress> {
    let raw = raw?;
    match raw.parse::<MacAddress>() {
        Ok(mac) if mac.is_zero() => None,
        Ok(mac) => Some(mac),
        Err(e) => {
            debug!("{name}: dropping MAC address: {e}");
            None
        }
    }
}

/// Parses, de-duplicates (first occurrence wins) and keeps discovery order.
fn parse_addresses(name: &str, raw: &[String]) -> Vec<IpNetwork> {
    let mut out: Vec<IpNetwork> = Vec::with_capacity(raw.len());
    for entry in raw {
        let Some(net) = parse_network(entry) else {
            debug!("{name}: dropping unparseable address {entry:?}");
            continue;
        };
        if !out.contains(&net) {
            out.push(net);
        }
    }
    out
}

fn parse_network(entry: &str) -> Option<IpNetwork> {
    let entry = entry.trim();
    if entry.contains('/') {
        return entry.parse().ok();
    }
    // Zone suffixes like `fe80::1%eth0` are not part of the address.
    let bare = entry.split('%').next().unwrap_or(entry);
    bare.parse::<IpAddr>().ok().map(IpNetwork::from)
}

fn is_loopback_name(name: &str) -> bool {
    name.strip_prefix("lo")
        .is_some_and(|rest| rest.chars().all(|c| c.is_ascii_digit()))
}

fn has_prefix(name: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| name.starts_with(prefix))
}
