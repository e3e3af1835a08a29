//! # Mock Interface Source
//!
//! A fixed set of interfaces for containers and CI runners where the real host
//! has little more than `lo` and one veth. It goes through the same
//! [`InterfaceSource`] contract as the live probe, so every downstream stage
//! (normalization, filtering, vendor resolution) runs unchanged.

use netgrid_common::error::ProbeError;
use netgrid_common::network::interface::InterfaceFlags as F;
use netgrid_common::network::raw::RawInterfaceFacts;
use netgrid_common::system::InterfaceSource;

const ETHER_UP: u32 = F::UP | F::BROADCAST | F::RUNNING | F::MULTICAST;
const ETHER_DOWN: u32 = F::BROADCAST | F::MULTICAST;
const TUNNEL_UP: u32 = F::UP | F::POINTOPOINT | F::RUNNING | F::NOARP | F::MULTICAST;

struct Fixture {
    name: &'static str,
    mac: Option<&'static str>,
    addresses: &'static [&'static str],
    oper_state: &'static str,
    speed: Option<i64>,
    duplex: Option<&'static str>,
    mtu: u32,
    driver: Option<&'static str>,
    flags: u32,
    wireless: bool,
    has_device: bool,
}

const FIXTURES: &[Fixture] = &[
    Fixture {
        name: "lo",
        mac: None,
        addresses: &["127.0.0.1/8", "::1/128"],
        oper_state: "unknown",
        speed: None,
        duplex: None,
        mtu: 65536,
        driver: None,
        flags: F::UP | F::LOOPBACK | F::RUNNING,
        wireless: false,
        has_device: false,
    },
    Fixture {
        name: "eth0",
        mac: Some("52:54:00:12:34:56"),
        addresses: &["192.168.1.100/24", "fe80::5054:ff:fe12:3456/64"],
        oper_state: "up",
        speed: Some(1000),
        duplex: Some("full"),
        mtu: 1500,
        driver: Some("virtio_net"),
        flags: ETHER_UP,
        wireless: false,
        has_device: true,
    },
    Fixture {
        name: "eth1",
        mac: Some("08:00:27:ab:cd:ef"),
        addresses: &["10.0.0.50/24"],
        oper_state: "up",
        speed: Some(100),
        duplex: Some("full"),
        mtu: 1500,
        driver: Some("e1000"),
        flags: ETHER_UP,
        wireless: false,
        has_device: true,
    },
    Fixture {
        name: "wlan0",
        mac: Some("24:f5:aa:11:22:33"),
        addresses: &["192.168.0.105/24", "fe80::26f5:aaff:fe11:2233/64"],
        oper_state: "up",
        speed: Some(54),
        duplex: Some("half"),
        mtu: 1500,
        driver: Some("iwlwifi"),
        flags: ETHER_UP,
        wireless: true,
        has_device: true,
    },
    Fixture {
        name: "enp0s3",
        mac: Some("08:00:27:44:55:66"),
        addresses: &["172.16.1.20/24"],
        oper_state: "up",
        speed: Some(1000),
        duplex: Some("full"),
        mtu: 1500,
        driver: Some("e1000"),
        flags: ETHER_UP,
        wireless: false,
        has_device: true,
    },
    Fixture {
        name: "enp0s8",
        mac: Some("08:00:27:77:88:99"),
        addresses: &[],
        oper_state: "down",
        speed: None,
        duplex: None,
        mtu: 1500,
        driver: Some("e1000"),
        flags: ETHER_DOWN,
        wireless: false,
        has_device: true,
    },
    Fixture {
        name: "bond0",
        mac: Some("52:54:00:aa:bb:cc"),
        addresses: &["10.1.1.10/24"],
        oper_state: "up",
        speed: Some(2000),
        duplex: Some("full"),
        mtu: 1500,
        driver: Some("bonding"),
        flags: ETHER_UP | F::MASTER,
        wireless: false,
        has_device: false,
    },
    Fixture {
        name: "br0",
        mac: Some("52:54:00:dd:ee:ff"),
        addresses: &["192.168.100.1/24"],
        oper_state: "up",
        speed: None,
        duplex: None,
        mtu: 1500,
        driver: Some("bridge"),
        flags: ETHER_UP,
        wireless: false,
        has_device: false,
    },
    Fixture {
        name: "eth0.100",
        mac: Some("52:54:00:12:34:56"),
        addresses: &["10.100.1.5/24"],
        oper_state: "up",
        speed: Some(1000),
        duplex: Some("full"),
        mtu: 1500,
        driver: Some("virtio_net"),
        flags: ETHER_UP,
        wireless: false,
        has_device: false,
    },
    Fixture {
        name: "tun0",
        mac: None,
        addresses: &["10.8.0.2/24"],
        oper_state: "unknown",
        speed: None,
        duplex: None,
        mtu: 1500,
        driver: Some("tun"),
        flags: TUNNEL_UP,
        wireless: false,
        has_device: false,
    },
];

/// Interfaces the default exclusion filter drops.
const FILTERED_FIXTURES: &[Fixture] = &[
    Fixture {
        name: "veth0abc123",
        mac: Some("02:42:ac:11:00:02"),
        addresses: &[],
        oper_state: "up",
        speed: Some(10000),
        duplex: Some("full"),
        mtu: 1500,
        driver: Some("veth"),
        flags: ETHER_UP,
        wireless: false,
        has_device: false,
    },
    Fixture {
        name: "br-docker0",
        mac: Some("02:42:12:34:56:78"),
        addresses: &["172.17.0.1/16"],
        oper_state: "up",
        speed: None,
        duplex: None,
        mtu: 1500,
        driver: Some("bridge"),
        flags: ETHER_UP,
        wireless: false,
        has_device: false,
    },
    Fixture {
        name: "tailscale0",
        mac: None,
        addresses: &["100.64.0.1/32"],
        oper_state: "unknown",
        speed: None,
        duplex: None,
        mtu: 1280,
        driver: Some("tun"),
        flags: TUNNEL_UP,
        wireless: false,
        has_device: false,
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct MockSource {
    include_filtered: bool,
}

impl MockSource {
    pub fn new(include_filtered: bool) -> Self {
        Self { include_filtered }
    }
}

impl InterfaceSource for MockSource {
    fn probe_all(&self) -> Result<Vec<RawInterfaceFacts>, ProbeError> {
        let extra: &[Fixture] = if self.include_filtered {
            FILTERED_FIXTURES
        } else {
            &[]
        };

        Ok(FIXTURES
            .iter()
            .chain(extra)
            .zip(1u32..)
            .map(|(fixture, index)| fixture.to_facts(index))
            .collect())
    }
}

impl Fixture {
    fn to_facts(&self, index: u32) -> RawInterfaceFacts {
        RawInterfaceFacts {
            name: self.name.to_string(),
            index,
            oper_state: Some(self.oper_state.to_string()),
            mac: self.mac.map(str::to_string),
            mtu: Some(self.mtu),
            speed: self.speed,
            duplex: self.duplex.map(str::to_string),
            driver: self.driver.map(str::to_string),
            flags: self.flags,
            wireless: self.wireless,
            has_device: self.has_device,
            addresses: self.addresses.iter().map(|a| a.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ExclusionFilter;
    use crate::normalizer::normalize;
    use netgrid_common::network::interface::{InterfaceType, LinkState};

    #[test]
    fn filtered_fixtures_are_opt_in() {
        let base = MockSource::default().probe_all().unwrap();
        let full = MockSource::new(true).probe_all().unwrap();
        assert_eq!(base.len(), 10);
        assert_eq!(full.len(), 13);
        assert!(!base.iter().any(|f| f.name == "veth0abc123"));
    }

    #[test]
    fn indices_are_unique_and_ordered() {
        let facts = MockSource::new(true).probe_all().unwrap();
        assert!(facts.windows(2).all(|w| w[0].index < w[1].index));
    }

    #[test]
    fn covers_every_interface_type() {
        let kinds: Vec<InterfaceType> = MockSource::new(true)
            .probe_all()
            .unwrap()
            .into_iter()
            .map(|f| normalize(f).interface_type)
            .collect();
        for kind in [
            InterfaceType::Physical,
            InterfaceType::Wireless,
            InterfaceType::Virtual,
            InterfaceType::Loopback,
        ] {
            assert!(kinds.contains(&kind), "no fixture classified as {kind}");
        }
    }

    #[test]
    fn default_filter_drops_exactly_the_extras() {
        let filter = ExclusionFilter::default();
        let kept: Vec<String> = MockSource::new(true)
            .probe_all()
            .unwrap()
            .into_iter()
            .map(normalize)
            .filter(|i| !filter.excludes(i))
            .map(|i| i.name)
            .collect();
        let expected: Vec<&str> = FIXTURES.iter().map(|f| f.name).collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn normalized_fixtures_look_right() {
        let ifaces: Vec<_> = MockSource::default()
            .probe_all()
            .unwrap()
            .into_iter()
            .map(normalize)
            .collect();
        let by_name = |name: &str| ifaces.iter().find(|i| i.name == name).unwrap();

        assert_eq!(by_name("lo").link_state, LinkState::Up);
        assert_eq!(by_name("tun0").link_state, LinkState::Up);
        assert_eq!(by_name("tun0").interface_type, InterfaceType::Virtual);
        assert_eq!(by_name("enp0s8").link_state, LinkState::Down);
        assert_eq!(by_name("enp0s8").speed_mbps, None);
        assert_eq!(by_name("eth1").speed_mbps, Some(100));
        assert!(ifaces.iter().all(|i| i.vendor.is_none()));
    }
}
