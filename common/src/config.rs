use std::path::PathBuf;
use std::time::Duration;

/// Cached vendor answers, positive or negative, older than this are re-resolved online.
pub const DEFAULT_CACHE_MAX_AGE: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Per-request timeout for remote vendor lookups.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on concurrent remote vendor lookups within one batch.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

pub const DEFAULT_VENDOR_ENDPOINT: &str = "https://api.macvendors.com";

const CACHE_DIR: &str = ".netgrid/cache";
const CACHE_FILE: &str = "vendor_cache.json";

/// Where interface facts come from for a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataSource {
    /// The host's own interfaces.
    #[default]
    Live,
    /// Fixed fixture interfaces, for environments without real hardware.
    Mock {
        /// Also emit the interfaces the default filter drops (veth, docker bridges, tailscale).
        include_filtered: bool,
    },
}

/// Everything the collection core needs to know, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Resolve vendor names at all. When off the cache file is never opened.
    pub vendor_lookup: bool,
    /// Never touch the network; accept stale cache entries and fall back to the bundled OUI table.
    pub offline: bool,
    pub cache_max_age: Duration,
    /// Overrides [`default_cache_path`].
    pub cache_path: Option<PathBuf>,
    pub vendor_endpoint: String,
    pub lookup_timeout: Duration,
    pub max_in_flight: usize,
    /// Extra interface-name patterns to exclude, on top of the default denylist.
    pub exclude: Vec<String>,
    pub data_source: DataSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vendor_lookup: true,
            offline: false,
            cache_max_age: DEFAULT_CACHE_MAX_AGE,
            cache_path: None,
            vendor_endpoint: DEFAULT_VENDOR_ENDPOINT.to_string(),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            exclude: Vec::new(),
            data_source: DataSource::Live,
        }
    }
}

impl Config {
    pub fn cache_path(&self) -> PathBuf {
        self.cache_path.clone().unwrap_or_else(default_cache_path)
    }
}

/// `~/.netgrid/cache/vendor_cache.json`, or relative to the working directory without a home.
pub fn default_cache_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(CACHE_DIR)
        .join(CACHE_FILE)
}
