use crate::error::ProbeError;
use crate::network::raw::RawInterfaceFacts;

/// Defines the contract for reading raw interface facts from some environment.
///
/// The live host probe and the mock fixture source both implement this, and
/// nothing downstream can tell them apart.
pub trait InterfaceSource: Send + Sync {
    /// Returns every interface the environment knows about, in a stable order.
    ///
    /// Missing attributes are reported as `None`. Only a total failure to
    /// enumerate is an error.
    fn probe_all(&self) -> Result<Vec<RawInterfaceFacts>, ProbeError>;
}
