use std::fmt;
use std::net::IpAddr;

use pnet::ipnetwork::{IpNetwork, Ipv4Network, Ipv6Network};
use serde::{Serialize, Serializer};

use crate::network::mac::MacAddress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkState {
    Up,
    Down,
    Unknown,
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LinkState::Up => "UP",
            LinkState::Down => "DOWN",
            LinkState::Unknown => "UNKNOWN",
        })
    }
}

/// Derived from naming conventions and kernel flags, never read directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceType {
    Physical,
    Wireless,
    Virtual,
    Loopback,
    Unknown,
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InterfaceType::Physical => "physical",
            InterfaceType::Wireless => "wireless",
            InterfaceType::Virtual => "virtual",
            InterfaceType::Loopback => "loopback",
            InterfaceType::Unknown => "unknown",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Duplex {
    Full,
    Half,
    Unknown,
}

/// Kernel `IFF_*` flag bits as exposed by `/sys/class/net/<if>/flags`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InterfaceFlags(u32);

impl InterfaceFlags {
    pub const UP: u32 = 1;
    pub const BROADCAST: u32 = 1 << 1;
    pub const DEBUG: u32 = 1 << 2;
    pub const LOOPBACK: u32 = 1 << 3;
    pub const POINTOPOINT: u32 = 1 << 4;
    pub const NOTRAILERS: u32 = 1 << 5;
    pub const RUNNING: u32 = 1 << 6;
    pub const NOARP: u32 = 1 << 7;
    pub const PROMISC: u32 = 1 << 8;
    pub const ALLMULTI: u32 = 1 << 9;
    pub const MASTER: u32 = 1 << 10;
    pub const SLAVE: u32 = 1 << 11;
    pub const MULTICAST: u32 = 1 << 12;

    const NAMES: [(u32, &'static str); 13] = [
        (Self::UP, "UP"),
        (Self::BROADCAST, "BROADCAST"),
        (Self::DEBUG, "DEBUG"),
        (Self::LOOPBACK, "LOOPBACK"),
        (Self::POINTOPOINT, "POINTOPOINT"),
        (Self::NOTRAILERS, "NOTRAILERS"),
        (Self::RUNNING, "RUNNING"),
        (Self::NOARP, "NOARP"),
        (Self::PROMISC, "PROMISC"),
        (Self::ALLMULTI, "ALLMULTI"),
        (Self::MASTER, "MASTER"),
        (Self::SLAVE, "SLAVE"),
        (Self::MULTICAST, "MULTICAST"),
    ];

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn contains(&self, flag: u32) -> bool {
        self.0 & flag == flag
    }

    pub fn is_loopback(&self) -> bool {
        self.contains(Self::LOOPBACK)
    }

    pub fn is_point_to_point(&self) -> bool {
        self.contains(Self::POINTOPOINT)
    }

    pub fn names(&self) -> Vec<&'static str> {
        Self::NAMES
            .iter()
            .filter(|(bit, _)| self.contains(*bit))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl Serialize for InterfaceFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.names())
    }
}

/// The canonical record for one interface in one discovery pass.
///
/// Only the normalizer builds these; `vendor` is attached afterwards by the
/// collector from the vendor resolver's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInterface {
    pub name: String,
    pub mac: Option<MacAddress>,
    #[serde(serialize_with = "display_seq")]
    pub ip_addresses: Vec<IpNetwork>,
    #[serde(serialize_with = "display_seq")]
    pub ipv4_addresses: Vec<Ipv4Network>,
    #[serde(serialize_with = "display_seq")]
    pub ipv6_addresses: Vec<Ipv6Network>,
    pub link_state: LinkState,
    pub speed_mbps: Option<u32>,
    pub mtu: Option<u32>,
    pub driver: Option<String>,
    pub duplex: Duplex,
    pub flags: InterfaceFlags,
    pub interface_type: InterfaceType,
    pub vendor: Option<String>,
}

impl NetworkInterface {
    pub fn with_vendor(mut self, vendor: Option<String>) -> Self {
        self.vendor = vendor;
        self
    }

    pub fn is_up(&self) -> bool {
        self.link_state == LinkState::Up
    }

    pub fn is_physical(&self) -> bool {
        self.interface_type == InterfaceType::Physical
    }

    pub fn has_ip(&self) -> bool {
        !self.ip_addresses.is_empty()
    }

    /// First IPv4 address, otherwise the first IPv6 address.
    pub fn primary_ip(&self) -> Option<IpAddr> {
        self.ipv4_addresses
            .first()
            .map(|net| IpAddr::V4(net.ip()))
            .or_else(|| self.ipv6_addresses.first().map(|net| IpAddr::V6(net.ip())))
    }
}

#[allow(clippy::ptr_arg)]
fn display_seq<T, S>(items: &Vec<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: Serializer,
{
    serializer.collect_seq(items.iter().map(ToString::to_string))
}
