use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use netgrid_common::error::LookupError;
use netgrid_common::network::mac::OuiPrefix;
use netgrid_common::vendors::VendorSource;

/// Plain-text vendor lookups against a macvendors.com style endpoint:
/// `GET {endpoint}/AA:BB:CC` answers with the vendor name as the whole body.
pub struct MacVendorsApi {
    client: Client,
    endpoint: String,
}

impl MacVendorsApi {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("netgrid/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl VendorSource for MacVendorsApi {
    fn name(&self) -> &'static str {
        "macvendors"
    }

    async fn lookup(&self, oui: &OuiPrefix) -> Result<String, LookupError> {
        let url = format!("{}/{}", self.endpoint, oui);
        debug!("GET {url}");

        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(transport_error)?;
        parse_body(&body)
    }
}

fn parse_body(body: &str) -> Result<String, LookupError> {
    let vendor = body.trim();
    if vendor.is_empty() {
        return Err(LookupError::EmptyBody);
    }
    // Error documents come back as JSON even on some 200 responses.
    if vendor.starts_with('{') {
        return Err(LookupError::Malformed);
    }
    Ok(vendor.to_string())
}

fn transport_error(e: reqwest::Error) -> LookupError {
    if e.is_timeout() {
        LookupError::Timeout
    } else if e.is_connect() {
        LookupError::Unreachable(e.to_string())
    } else {
        LookupError::Transport(e.to_string())
    }
}
