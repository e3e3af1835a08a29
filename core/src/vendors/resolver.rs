//! # Vendor Resolver
//!
//! Answers "who made this NIC" for a batch of MAC addresses at once.
//!
//! Every distinct OUI in a batch is resolved at most once: first from the
//! durable cache, then (for misses and stale entries) from a [`VendorSource`].
//! When the source fails, an optional fallback source gets a turn. Lookup
//! failures never propagate. They become an absent vendor and, in online mode,
//! a negative cache entry.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use netgrid_common::config::Config;
use netgrid_common::error::LookupError;
use netgrid_common::network::mac::{MacAddress, OuiPrefix};
use netgrid_common::vendors::VendorSource;

use crate::vendors::bundled::BundledOuiDatabase;
use crate::vendors::cache::{CacheStats, VendorCache};
use crate::vendors::remote::MacVendorsApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    /// No vendor names at all. The cache is never opened.
    Disabled,
    /// Cache first, then the remote source and its fallback for misses and stale entries.
    /// Outcomes are cached.
    Online,
    /// Cache (stale entries accepted), then the bundled database. Nothing is written back.
    Offline,
}

pub struct VendorResolver {
    mode: LookupMode,
    cache: Option<Mutex<VendorCache>>,
    source: Option<Arc<dyn VendorSource>>,
    fallback: Option<Arc<dyn VendorSource>>,
    max_age: Duration,
    max_in_flight: usize,
}

impl VendorResolver {
    pub fn new(
        cache: VendorCache,
        source: Arc<dyn VendorSource>,
        mode: LookupMode,
        max_age: Duration,
        max_in_flight: usize,
    ) -> Self {
        if mode == LookupMode::Disabled {
            return Self::disabled();
        }
        Self {
            mode,
            cache: Some(Mutex::new(cache)),
            source: Some(source),
            fallback: None,
            max_age,
            max_in_flight: max_in_flight.max(1),
        }
    }

    pub fn disabled() -> Self {
        Self {
            mode: LookupMode::Disabled,
            cache: None,
            source: None,
            fallback: None,
            max_age: Duration::ZERO,
            max_in_flight: 1,
        }
    }

    /// Consulted whenever the primary source fails for a prefix.
    pub fn with_fallback(mut self, fallback: Arc<dyn VendorSource>) -> Self {
        if self.is_enabled() {
            self.fallback = Some(fallback);
        }
        self
    }

    /// Online mode asks the remote endpoint first and the bundled database second.
    pub fn from_config(config: &Config) -> Self {
        if !config.vendor_lookup {
            debug!("Vendor lookup disabled");
            return Self::disabled();
        }

        let cache = VendorCache::load(config.cache_path());
        let offline = |cache: VendorCache| {
            Self::new(
                cache,
                Arc::new(BundledOuiDatabase),
                LookupMode::Offline,
                config.cache_max_age,
                config.max_in_flight,
            )
        };
        if config.offline {
            return offline(cache);
        }

        match MacVendorsApi::new(config.vendor_endpoint.clone(), config.lookup_timeout) {
            Ok(api) => {
                debug!("Resolving vendors via {}", api.endpoint());
                Self::new(
                    cache,
                    Arc::new(api),
                    LookupMode::Online,
                    config.cache_max_age,
                    config.max_in_flight,
                )
                .with_fallback(Arc::new(BundledOuiDatabase))
            }
            Err(e) => {
                warn!("HTTP client unavailable ({e}), resolving vendors offline");
                offline(cache)
            }
        }
    }

    pub fn mode(&self) -> LookupMode {
        self.mode
    }

    pub fn is_enabled(&self) -> bool {
        self.mode != LookupMode::Disabled
    }

    pub async fn cache_stats(&self) -> Option<CacheStats> {
        match &self.cache {
            Some(cache) => Some(cache.lock().await.stats()),
            None => None,
        }
    }

    pub async fn resolve(&self, mac: &MacAddress) -> Option<String> {
        self.resolve_batch(std::slice::from_ref(mac))
            .await
            .remove(mac)
            .flatten()
    }

    /// Resolves every address in `macs`. The returned map has one key per input address.
    pub async fn resolve_batch(&self, macs: &[MacAddress]) -> HashMap<MacAddress, Option<String>> {
        let (Some(cache), Some(source)) = (&self.cache, &self.source) else {
            return macs.iter().map(|mac| (*mac, None)).collect();
        };

        let ouis: BTreeSet<OuiPrefix> = macs.iter().map(MacAddress::oui).collect();
        let mut answers: HashMap<OuiPrefix, Option<String>> = HashMap::with_capacity(ouis.len());
        let mut pending: Vec<OuiPrefix> = Vec::new();

        {
            let cache = cache.lock().await;
            for oui in ouis {
                match cache.get(&oui) {
                    Some(entry)
                        if self.mode == LookupMode::Offline
                            || !VendorCache::is_stale(entry, self.max_age) =>
                    {
                        answers.insert(oui, entry.vendor_name.clone());
                    }
                    _ => pending.push(oui),
                }
            }
        }

        let cached = answers.len();
        let looked_up = pending.len();

        let mut lookups = stream::iter(pending)
            .map(|oui| self.lookup(source, oui))
            .buffer_unordered(self.max_in_flight);

        while let Some((oui, vendor)) = lookups.next().await {
            if self.mode == LookupMode::Online {
                cache.lock().await.put(oui, vendor.clone());
            }
            answers.insert(oui, vendor);
        }

        if self.mode == LookupMode::Online {
            Self::flush(cache).await;
        }

        if looked_up > 0 || cached > 0 {
            info!("Resolved {} vendor prefixes ({cached} cached, {looked_up} looked up)", cached + looked_up);
        }

        macs.iter()
            .map(|mac| (*mac, answers.get(&mac.oui()).cloned().flatten()))
            .collect()
    }

    async fn lookup(&self, source: &Arc<dyn VendorSource>, oui: OuiPrefix) -> (OuiPrefix, Option<String>) {
        for source in std::iter::once(source).chain(self.fallback.as_ref()) {
            match source.lookup(&oui).await {
                Ok(name) => {
                    debug!("{oui} -> {name} ({})", source.name());
                    return (oui, Some(name));
                }
                Err(e) => log_failure(source.name(), &oui, &e),
            }
        }
        (oui, None)
    }

    /// The file write runs on the blocking pool. The lock stays held so writes never reorder.
    async fn flush(cache: &Mutex<VendorCache>) {
        let mut cache = cache.lock().await;
        let Some(pending) = cache.take_pending() else {
            return;
        };
        let outcome = tokio::task::spawn_blocking(move || pending.write())
            .await
            .map_err(|e| e.to_string())
            .and_then(|written| written.map_err(|e| e.to_string()));
        if let Err(e) = outcome {
            warn!("Vendor cache not saved: {e}");
            cache.mark_dirty();
        }
    }
}

fn log_failure(source: &str, oui: &OuiPrefix, e: &LookupError) {
    match e {
        LookupError::NotFound | LookupError::Status(404) => {
            debug!("{oui}: no vendor registered ({source})")
        }
        _ => warn!("{oui}: vendor lookup failed ({source}): {e}"),
    }
}
