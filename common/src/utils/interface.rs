use pnet::ipnetwork::{IpNetwork, Ipv4Network, Ipv6Network};

/// Family-bucketing helpers over an ordered address list.
pub trait AddressFamilies {
    fn ipv4_nets(&self) -> Vec<Ipv4Network>;
    fn ipv6_nets(&self) -> Vec<Ipv6Network>;
}

impl AddressFamilies for [IpNetwork] {
    fn ipv4_nets(&self) -> Vec<Ipv4Network> {
        self.iter()
            .filter_map(|ip| {
                if let IpNetwork::V4(ipv4) = ip {
                    Some(*ipv4)
                } else {
                    None
                }
            })
            .collect()
    }

    fn ipv6_nets(&self) -> Vec<Ipv6Network> {
        self.iter()
            .filter_map(|ip| {
                if let IpNetwork::V6(ipv6) = ip {
                    Some(*ipv6)
                } else {
                    None
                }
            })
            .collect()
    }
}
