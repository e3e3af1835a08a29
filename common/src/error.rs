use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid hardware address: {input:?}")]
pub struct AddressParseError {
    input: String,
}

impl AddressParseError {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// Failure to enumerate interfaces at all. Always fatal for a pass.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no network interfaces could be enumerated")]
    NoInterfaces,
}

/// The only error class that crosses the collector boundary.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error(transparent)]
    Probe(#[from] ProbeError),
    #[error("interface discovery was interrupted: {0}")]
    Interrupted(String),
}

/// Why a single vendor lookup produced no name.
///
/// These never escape the resolver; they end up as an absent vendor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("lookup timed out")]
    Timeout,
    #[error("vendor endpoint answered with status {0}")]
    Status(u16),
    #[error("vendor endpoint returned an empty body")]
    EmptyBody,
    #[error("vendor endpoint returned a malformed body")]
    Malformed,
    #[error("vendor endpoint unreachable: {0}")]
    Unreachable(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("no vendor registered for this prefix")]
    NotFound,
}
