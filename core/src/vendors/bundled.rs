use std::sync::OnceLock;

use async_trait::async_trait;
use mac_oui::Oui;
use tracing::warn;

use netgrid_common::error::LookupError;
use netgrid_common::network::mac::OuiPrefix;
use netgrid_common::vendors::VendorSource;

static OUI_DB: OnceLock<Option<Oui>> = OnceLock::new();

fn get_oui_db() -> Option<&'static Oui> {
    OUI_DB
        .get_or_init(|| match Oui::default() {
            Ok(db) => Some(db),
            Err(e) => {
                warn!("Failed to load bundled OUI database: {e:?}");
                None
            }
        })
        .as_ref()
}

/// The OUI registry compiled into the binary. Used when the network is off limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledOuiDatabase;

impl BundledOuiDatabase {
    pub fn lookup_blocking(&self, oui: &OuiPrefix) -> Result<String, LookupError> {
        let db = get_oui_db().ok_or(LookupError::NotFound)?;
        let mac_str = oui.first_address().to_string();
        match db.lookup_by_mac(&mac_str) {
            Ok(Some(entry)) => Ok(entry.company_name.clone()),
            Ok(None) => Err(LookupError::NotFound),
            Err(_) => Err(LookupError::Malformed),
        }
    }
}

#[async_trait]
impl VendorSource for BundledOuiDatabase {
    fn name(&self) -> &'static str {
        "bundled-oui"
    }

    /// The first call parses the whole registry, so every lookup runs on the blocking pool.
    async fn lookup(&self, oui: &OuiPrefix) -> Result<String, LookupError> {
        let (db, oui) = (*self, *oui);
        tokio::task::spawn_blocking(move || db.lookup_blocking(&oui))
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?
    }
}
