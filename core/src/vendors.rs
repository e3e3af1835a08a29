//! Vendor name resolution: the durable cache, the lookup sources and the
//! resolver that coordinates them.

pub mod bundled;
pub mod cache;
pub mod remote;
pub mod resolver;

pub use bundled::BundledOuiDatabase;
pub use cache::{CacheEntry, CacheError, CacheStats, PendingWrite, VendorCache};
pub use remote::MacVendorsApi;
pub use resolver::{LookupMode, VendorResolver};
