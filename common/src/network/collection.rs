use serde::Serialize;

use crate::network::interface::{InterfaceType, LinkState, NetworkInterface};

/// Interfaces in probe order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InterfaceCollection {
    interfaces: Vec<NetworkInterface>,
}

impl InterfaceCollection {
    pub fn new(interfaces: Vec<NetworkInterface>) -> Self {
        Self { interfaces }
    }

    pub fn get(&self, name: &str) -> Option<&NetworkInterface> {
        self.interfaces.iter().find(|iface| iface.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NetworkInterface> {
        self.interfaces.iter()
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.interfaces.iter().map(|iface| iface.name.as_str()).collect()
    }

    pub fn filter_by_state(&self, state: LinkState) -> Self {
        self.retain(|iface| iface.link_state == state)
    }

    pub fn filter_by_type(&self, interface_type: InterfaceType) -> Self {
        self.retain(|iface| iface.interface_type == interface_type)
    }

    pub fn up(&self) -> Self {
        self.filter_by_state(LinkState::Up)
    }

    pub fn down(&self) -> Self {
        self.filter_by_state(LinkState::Down)
    }

    pub fn physical(&self) -> Self {
        self.retain(NetworkInterface::is_physical)
    }

    pub fn sort_by_name(&self) -> Self {
        let mut interfaces = self.interfaces.clone();
        interfaces.sort_by(|a, b| a.name.cmp(&b.name));
        Self { interfaces }
    }

    /// Up first, then unknown, then down. Stable within each group.
    pub fn sort_by_state(&self) -> Self {
        let mut interfaces = self.interfaces.clone();
        interfaces.sort_by_key(|iface| match iface.link_state {
            LinkState::Up => 0,
            LinkState::Unknown => 1,
            LinkState::Down => 2,
        });
        Self { interfaces }
    }

    fn retain(&self, keep: impl Fn(&NetworkInterface) -> bool) -> Self {
        Self {
            interfaces: self.interfaces.iter().filter(|iface| keep(iface)).cloned().collect(),
        }
    }
}

impl IntoIterator for InterfaceCollection {
    type Item = NetworkInterface;
    type IntoIter = std::vec::IntoIter<NetworkInterface>;

    fn into_iter(self) -> Self::IntoIter {
        self.interfaces.into_iter()
    }
}

impl<'a> IntoIterator for &'a InterfaceCollection {
    type Item = &'a NetworkInterface;
    type IntoIter = std::slice::Iter<'a, NetworkInterface>;

    fn into_iter(self) -> Self::IntoIter {
        self.interfaces.iter()
    }
}

impl FromIterator<NetworkInterface> for InterfaceCollection {
    fn from_iter<I: IntoIterator<Item = NetworkInterface>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
