//! Mapping from configuration to core session types.

use tentvakt_config::{CatalogConfig, SessionConfig};
use tentvakt_core::classifier::SignalCatalog;
use tentvakt_core::session::SessionParams;

pub(crate) fn catalog_from(config: &CatalogConfig) -> SignalCatalog {
    let mut catalog = match config.profile.as_str() {
        "compact" => SignalCatalog::compact(),
        _ => SignalCatalog::primary(),
    };
    catalog.set_blocked_shortcuts(config.blocked_shortcuts.clone());
    catalog
}

pub(crate) fn params_from(config: &SessionConfig) -> SessionParams {
    SessionParams {
        lockout_threshold: config.lockout_threshold,
        retention: config.retention,
        limit_secs: config.time_limit_secs,
    }
}
