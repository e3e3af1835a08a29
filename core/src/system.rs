//! # Host Interface Probe
//!
//! Reads raw interface facts from the running host.
//!
//! Link enumeration (names, indices, MACs, addresses, flags) goes through
//! `pnet::datalink`. Everything the datalink layer does not expose (operational
//! state, speed, duplex, MTU, driver, wireless/device presence) is read from
//! `sysfs`. On hosts without `sysfs` those attributes are simply absent.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use pnet::datalink::{self, NetworkInterface};
use rayon::prelude::*;
use tracing::debug;

use netgrid_common::error::ProbeError;
use netgrid_common::network::raw::RawInterfaceFacts;
use netgrid_common::system::InterfaceSource;

pub const SYSFS_NET: &str = "/sys/class/net";

/// The live [`InterfaceSource`].
pub struct SysfsProbe {
    sysfs_root: PathBuf,
}

impl Default for SysfsProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SysfsProbe {
    pub fn new() -> Self {
        Self::with_root(SYSFS_NET)
    }

    /// Reads attributes below `root` instead of `/sys/class/net`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            sysfs_root: root.into(),
        }
    }

    /// Facts for an already enumerated set of links, sorted by kernel index.
    pub fn facts_for(&self, links: &[NetworkInterface]) -> Vec<RawInterfaceFacts> {
        let mut facts: Vec<RawInterfaceFacts> = links
            .par_iter()
            .map(|link| read_link(link, &self.sysfs_root.join(&link.name)))
            .collect();
        facts.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.name.cmp(&b.name)));
        facts
    }
}

impl InterfaceSource for SysfsProbe {
    fn probe_all(&self) -> Result<Vec<RawInterfaceFacts>, ProbeError> {
        let links: Vec<NetworkInterface> = datalink::interfaces();
        if links.is_empty() {
            return Err(ProbeError::NoInterfaces);
        }
        debug!("Enumerated {} links", links.len());
        Ok(self.facts_for(&links))
    }
}

fn read_link(link: &NetworkInterface, dir: &Path) -> RawInterfaceFacts {
    let flags = read_trimmed(dir, "flags")
        .and_then(|raw| u32::from_str_radix(raw.trim_start_matches("0x"), 16).ok())
        .unwrap_or(link.flags);

    RawInterfaceFacts {
        name: link.name.clone(),
        index: link.index,
        oper_state: read_trimmed(dir, "operstate"),
        mac: link
            .mac
            .map(|mac| mac.to_string())
            .or_else(|| read_trimmed(dir, "address")),
        mtu: read_trimmed(dir, "mtu").and_then(|raw| raw.parse().ok()),
        speed: read_trimmed(dir, "speed")
            .and_then(|raw| raw.parse().ok())
            .filter(|mbps: &i64| *mbps >= 0),
        duplex: read_trimmed(dir, "duplex"),
        driver: read_driver(dir),
        flags,
        wireless: dir.join("wireless").is_dir() || dir.join("phy80211").exists(),
        has_device: dir.join("device").exists(),
        addresses: link.ips.iter().map(ToString::to_string).collect(),
    }
}

/// Reads one attribute file. Down links answer `EINVAL` for `speed` and `duplex`,
/// which is just another way of saying "not known".
fn read_trimmed(dir: &Path, attribute: &str) -> Option<String> {
    match fs::read_to_string(dir.join(attribute)) {
        Ok(raw) => {
            let value = raw.trim();
            (!value.is_empty()).then(|| value.to_string())
        }
        Err(e) => {
            if e.kind() != io::ErrorKind::NotFound {
                debug!("{}/{attribute} unreadable: {e}", dir.display());
            }
            None
        }
    }
}

fn read_driver(dir: &Path) -> Option<String> {
    if let Some(module) = read_trimmed(&dir.join("device/driver/module"), "name") {
        return Some(module);
    }
    fs::read_link(dir.join("device/driver"))
        .ok()
        .and_then(|target| target.file_name().map(|name| name.to_string_lossy().into_owned()))
}
