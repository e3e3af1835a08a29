//! # Interface Collector
//!
//! Implements the "list interfaces" use case.
//!
//! Orchestrates one discovery pass by:
//! 1. reading raw facts from an [`InterfaceSource`] (live probe or mock fixtures),
//! 2. normalizing and filtering them,
//! 3. enriching the survivors with vendor names from the [`VendorResolver`].

use std::sync::Arc;

use tracing::{debug, info};

use netgrid_common::config::{Config, DataSource};
use netgrid_common::error::CollectError;
use netgrid_common::network::collection::InterfaceCollection;
use netgrid_common::network::interface::NetworkInterface;
use netgrid_common::network::mac::MacAddress;
use netgrid_common::system::InterfaceSource;

use crate::filter::ExclusionFilter;
use crate::mock::MockSource;
use crate::normalizer::normalize;
use crate::system::SysfsProbe;
use crate::vendors::VendorResolver;

pub struct Collector {
    source: Arc<dyn InterfaceSource>,
    filter: ExclusionFilter,
    resolver: VendorResolver,
}

impl Collector {
    pub fn new(
        source: Arc<dyn InterfaceSource>,
        filter: ExclusionFilter,
        resolver: VendorResolver,
    ) -> Self {
        Self {
            source,
            filter,
            resolver,
        }
    }

    /// Wires the data source, default denylist plus configured patterns, and resolver.
    pub fn from_config(config: &Config) -> Self {
        let source: Arc<dyn InterfaceSource> = match config.data_source {
            DataSource::Live => Arc::new(SysfsProbe::new()),
            DataSource::Mock { include_filtered } => {
                info!("Using mock interface data");
                Arc::new(MockSource::new(include_filtered))
            }
        };
        let filter = ExclusionFilter::default().with_patterns(config.exclude.iter().cloned());
        debug!("{filter:?}");

        Self::new(source, filter, VendorResolver::from_config(config))
    }

    /// Runs a full pass: every interface that survives the exclusion filter, in probe order.
    pub async fn collect(&self) -> Result<InterfaceCollection, CollectError> {
        let probed = self.probe().await?;
        let total = probed.len();

        let kept: Vec<NetworkInterface> = probed
            .into_iter()
            .filter(|iface| {
                let excluded = self.filter.excludes(iface);
                if excluded {
                    debug!("Excluding {}", iface.name);
                }
                !excluded
            })
            .collect();

        info!("Collected {} interfaces ({} excluded)", kept.len(), total - kept.len());
        Ok(InterfaceCollection::new(self.enrich(kept).await))
    }

    /// Looks up one interface by name, ignoring the exclusion filter.
    pub async fn collect_one(&self, name: &str) -> Result<Option<NetworkInterface>, CollectError> {
        let Some(iface) = self.probe().await?.into_iter().find(|i| i.name == name) else {
            return Ok(None);
        };
        Ok(self.enrich(vec![iface]).await.pop())
    }

    async fn probe(&self) -> Result<Vec<NetworkInterface>, CollectError> {
        let source = Arc::clone(&self.source);
        let raw = tokio::task::spawn_blocking(move || source.probe_all())
            .await
            .map_err(|e| CollectError::Interrupted(e.to_string()))??;

        Ok(raw.into_iter().map(normalize).collect())
    }

    async fn enrich(&self, interfaces: Vec<NetworkInterface>) -> Vec<NetworkInterface> {
        if !self.resolver.is_enabled() {
            return interfaces;
        }

        let macs: Vec<MacAddress> = interfaces.iter().filter_map(|i| i.mac).collect();
        if macs.is_empty() {
            return interfaces;
        }
        let vendors = self.resolver.resolve_batch(&macs).await;

        interfaces
            .into_iter()
            .map(|iface| {
                let vendor = iface.mac.and_then(|mac| vendors.get(&mac).cloned().flatten());
                iface.with_vendor(vendor)
            })
            .collect()
    }
}
