use std::net::Ipv6Addr;

use colored::*;
use pnet::ipnetwork::{IpNetwork, Ipv4Network, Ipv6Network};

use netgrid_common::network::interface::{Duplex, LinkState, NetworkInterface};

use crate::terminal::{colors, print};

type Detail = (String, ColoredString);

fn ipv6_to_type_str(ipv6_addr: &Ipv6Addr) -> &'static str {
    let first_byte = ipv6_addr.octets()[0];
    if (0x20..=0x3F).contains(&first_byte) {
        return "GUA";
    }
    if ipv6_addr.is_unique_local() {
        return "ULA";
    }
    if ipv6_addr.is_unicast_link_local() {
        return "LLA";
    }
    if ipv6_addr.is_loopback() {
        return "LO6";
    }
    "IPv6"
}

fn ipv4_detail(net: &Ipv4Network) -> Detail {
    let address: ColoredString = net.ip().to_string().color(colors::IPV4_ADDR);
    let prefix: ColoredString = net.prefix().to_string().color(colors::IPV4_PREFIX);
    ("IPv4".to_string(), format!("{address}/{prefix}").color(colors::SEPARATOR))
}

fn ipv6_detail(net: &Ipv6Network) -> Detail {
    let address: ColoredString = net.ip().to_string().color(colors::IPV6_ADDR);
    let prefix: ColoredString = net.prefix().to_string().color(colors::IPV6_PREFIX);
    (
        ipv6_to_type_str(&net.ip()).to_string(),
        format!("{address}/{prefix}").color(colors::SEPARATOR),
    )
}

pub fn to_key_value_pair_net(ip_net: &[IpNetwork], show_ipv6: bool) -> Vec<Detail> {
    ip_net
        .iter()
        .filter_map(|net| match net {
            IpNetwork::V4(v4) => Some(ipv4_detail(v4)),
            IpNetwork::V6(v6) if show_ipv6 => Some(ipv6_detail(v6)),
            IpNetwork::V6(_) => None,
        })
        .collect()
}

pub fn state_tag(state: LinkState) -> ColoredString {
    let color = match state {
        LinkState::Up => colors::STATE_UP,
        LinkState::Down => colors::STATE_DOWN,
        LinkState::Unknown => colors::STATE_UNKNOWN,
    };
    format!("({state})").color(color).bold()
}

fn link_detail(interface: &NetworkInterface) -> Option<Detail> {
    let speed = interface.speed_mbps.map(|mbps| match mbps {
        m if m >= 1000 && m % 1000 == 0 => format!("{} Gbps", m / 1000),
        m => format!("{m} Mbps"),
    })?;
    let duplex = match interface.duplex {
        Duplex::Full => " full-duplex",
        Duplex::Half => " half-duplex",
        Duplex::Unknown => "",
    };
    Some(("Link".to_string(), format!("{speed}{duplex}").normal()))
}

pub fn interface_details(interface: &NetworkInterface, show_ipv6: bool) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![(
        "Type".to_string(),
        interface.interface_type.to_string().color(colors::SECONDARY),
    )];

    details.extend(to_key_value_pair_net(&interface.ip_addresses, show_ipv6));

    if let Some(mac_addr) = interface.mac {
        let mac: String = if mac_addr.is_locally_administered() {
            format!("{mac_addr} (local)")
        } else {
            mac_addr.to_string()
        };
        details.push(("MAC".to_string(), mac.color(colors::MAC_ADDR)));
    }
    if let Some(vendor) = &interface.vendor {
        details.push(("Vendor".to_string(), vendor.color(colors::VENDOR)));
    }
    if let Some(link) = link_detail(interface) {
        details.push(link);
    }
    if let Some(mtu) = interface.mtu {
        details.push(("MTU".to_string(), mtu.to_string().normal()));
    }
    if let Some(driver) = &interface.driver {
        details.push(("Driver".to_string(), driver.normal()));
    }
    details
}

pub fn print_interface(interface: &NetworkInterface, idx: usize, show_ipv6: bool) {
    print::tree_head(idx, &interface.name, state_tag(interface.link_state));
    print::as_tree_one_level(interface_details(interface, show_ipv6));
}
