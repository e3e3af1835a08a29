use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use netgrid_common::error::{LookupError, ProbeError};
use netgrid_common::network::mac::OuiPrefix;
use netgrid_common::network::raw::RawInterfaceFacts;
use netgrid_common::system::InterfaceSource;
use netgrid_common::vendors::VendorSource;
use netgrid_core::filter::ExclusionFilter;
use netgrid_core::vendors::{LookupMode, VendorCache, VendorResolver};
use netgrid_core::Collector;

pub const THIRTY_DAYS: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Vendor source that answers from a fixed table and counts every call.
#[derive(Default)]
pub struct CountingSource {
    answers: HashMap<OuiPrefix, String>,
    calls: AtomicUsize,
}

impl CountingSource {
    pub fn knowing(pairs: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            answers: pairs
                .iter()
                .map(|(oui, name)| (oui.parse().unwrap(), name.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VendorSource for CountingSource {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn lookup(&self, oui: &OuiPrefix) -> Result<String, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .get(oui)
            .cloned()
            .ok_or(LookupError::Status(404))
    }
}

/// Interface source returning the same facts on every probe.
pub struct FixedSource(pub Vec<RawInterfaceFacts>);

impl InterfaceSource for FixedSource {
    fn probe_all(&self) -> Result<Vec<RawInterfaceFacts>, ProbeError> {
        Ok(self.0.clone())
    }
}

pub struct Facts(RawInterfaceFacts);

impl Facts {
    pub fn new(name: &str, index: u32) -> Self {
        let mut raw = RawInterfaceFacts::new(name);
        raw.index = index;
        Self(raw)
    }

    pub fn up(mut self) -> Self {
        self.0.oper_state = Some("up".into());
        self
    }

    pub fn mac(mut self, mac: &str) -> Self {
        self.0.mac = Some(mac.into());
        self
    }

    pub fn speed(mut self, mbps: i64) -> Self {
        self.0.speed = Some(mbps);
        self
    }

    pub fn addr(mut self, addr: &str) -> Self {
        self.0.addresses.push(addr.into());
        self
    }

    pub fn flags(mut self, flags: u32) -> Self {
        self.0.flags = flags;
        self
    }

    pub fn build(self) -> RawInterfaceFacts {
        self.0
    }
}

pub fn online_resolver(cache_path: &Path, source: Arc<CountingSource>) -> VendorResolver {
    VendorResolver::new(
        VendorCache::load(cache_path),
        source,
        LookupMode::Online,
        THIRTY_DAYS,
        4,
    )
}

pub fn collector(facts: Vec<RawInterfaceFacts>, resolver: VendorResolver) -> Collector {
    Collector::new(Arc::new(FixedSource(facts)), ExclusionFilter::default(), resolver)
}
