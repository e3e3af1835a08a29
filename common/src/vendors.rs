use async_trait::async_trait;

use crate::error::LookupError;
use crate::network::mac::OuiPrefix;

/// Defines the contract for resolving device manufacturers from OUI prefixes.
#[async_trait]
pub trait VendorSource: Send + Sync {
    /// Short identifier used in log lines.
    fn name(&self) -> &'static str;

    /// Resolves one prefix to a vendor name.
    ///
    /// # Returns
    /// * `Ok(String)` - The vendor registered for the prefix.
    /// * `Err(LookupError)` - Nothing usable came back; the caller decides
    ///   whether that is worth remembering.
    async fn lookup(&self, oui: &OuiPrefix) -> Result<String, LookupError>;
}
