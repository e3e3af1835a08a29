pub mod cache;
pub mod list;
pub mod show;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use netgrid_common::config::{Config, DataSource, DEFAULT_MAX_IN_FLIGHT, DEFAULT_VENDOR_ENDPOINT};

const SECS_PER_DAY: u64 = 24 * 60 * 60;

#[derive(Parser)]
#[command(name = "netgrid")]
#[command(version, about = "Network interface inventory with MAC vendor lookup.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub lookup: LookupArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Use built-in fixture interfaces instead of the host's (also NETGRID_MOCK_MODE=1)
    #[arg(long, global = true)]
    pub mock: bool,

    /// With --mock, also emit the veth/docker/tailscale fixtures the default filter drops
    #[arg(long, global = true)]
    pub include_filtered: bool,

    /// Exclude interfaces whose name matches PATTERN (`*` wildcard), on top of the defaults
    #[arg(long = "exclude", value_name = "PATTERN", global = true)]
    pub exclude: Vec<String>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Args)]
pub struct LookupArgs {
    /// Disable vendor lookup entirely
    #[arg(long, global = true)]
    pub no_vendors: bool,

    /// Never query the network; use the cache and the bundled OUI table
    #[arg(long, global = true)]
    pub offline: bool,

    /// Re-resolve cached vendors older than this many days
    #[arg(long, value_name = "DAYS", default_value_t = 30, global = true)]
    pub cache_max_age_days: u64,

    /// Vendor cache file [default: ~/.netgrid/cache/vendor_cache.json]
    #[arg(long, value_name = "FILE", global = true)]
    pub cache_path: Option<PathBuf>,

    /// Base URL of the vendor lookup service
    #[arg(long, value_name = "URL", default_value = DEFAULT_VENDOR_ENDPOINT, global = true)]
    pub vendor_endpoint: String,

    /// Per-request timeout for vendor lookups
    #[arg(long, value_name = "SECS", default_value_t = 10, global = true)]
    pub timeout_secs: u64,
}

#[derive(Args, Clone, Copy)]
pub struct OutputArgs {
    /// Print JSON instead of the tree view
    #[arg(long, global = true)]
    pub json: bool,

    /// Show IPv6 addresses in addition to IPv4
    #[arg(long, global = true)]
    pub show_ipv6: bool,

    /// Print per-state and per-type counts after the listing
    #[arg(long, global = true)]
    pub show_summary: bool,
}

#[derive(Subcommand, Default)]
pub enum Commands {
    /// List every interface that survives the exclusion filter (default)
    #[default]
    #[command(alias = "l")]
    List,
    /// Show a single interface by name, even if it is normally filtered
    #[command(alias = "s")]
    Show { name: String },
    /// Inspect or reset the vendor cache
    #[command(alias = "c")]
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
pub enum CacheAction {
    /// Entry counts and location
    Stats,
    /// Remove every cached vendor answer
    Clear,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// `mock_env` is the already-read NETGRID_MOCK_MODE toggle.
    pub fn to_config(&self, mock_env: bool) -> Config {
        let data_source = if self.mock || mock_env {
            DataSource::Mock {
                include_filtered: self.include_filtered,
            }
        } else {
            DataSource::Live
        };

        Config {
            vendor_lookup: !self.lookup.no_vendors,
            offline: self.lookup.offline,
            cache_max_age: Duration::from_secs(self.lookup.cache_max_age_days.saturating_mul(SECS_PER_DAY)),
            cache_path: self.lookup.cache_path.clone(),
            vendor_endpoint: self.lookup.vendor_endpoint.clone(),
            lookup_timeout: Duration::from_secs(self.lookup.timeout_secs.max(1)),
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            exclude: self.exclude.clone(),
            data_source,
        }
    }
}

/// Accepts the usual truthy spellings: 1, true, yes, on.
pub fn env_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}
