use crate::config::ShopConfig;
use crate::errors::{PayError, Result};
use crate::interkassa::ShopClient;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::warn;

static CONFIG: OnceCell<Arc<ShopConfig>> = OnceCell::new();

/// Process-wide shop registry, set once at startup.
pub struct Pay;

impl Pay {
    /// Registers the shop. Later calls keep the first config.
    pub fn config(cfg: ShopConfig) {
        if CONFIG.set(Arc::new(cfg)).is_err() {
            warn!("shop config already set, ignoring");
        }
    }

    fn cfg() -> Result<Arc<ShopConfig>> {
        CONFIG
            .get()
            .cloned()
            .ok_or_else(|| PayError::Config("shop not configured".into()))
    }

    pub fn shop() -> Result<ShopClient> {
        Ok(ShopClient::new(Self::cfg()?))
    }
}
