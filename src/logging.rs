//! Tracing subscriber setup and transport log suppression.
//!
//! [`init`] installs a registry whose `EnvFilter` sits behind a reload
//! handle. [`suppress_transport_logs`] uses that handle to cap the HTTP
//! stack's targets at `info`, hiding wire and header chatter during the
//! license check. Both are best effort.

use crate::MulescanError;
use once_cell::sync::OnceCell;
use tracing::debug;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Targets whose verbose output is capped during the license check.
pub const TRANSPORT_TARGETS: [&str; 2] = ["hyper", "reqwest"];

static FILTER_HANDLE: OnceCell<reload::Handle<EnvFilter, Registry>> = OnceCell::new();

/// Install the global subscriber.
///
/// Uses `RUST_LOG` when set, `info` otherwise. Fails if another global
/// subscriber is already installed.
pub fn init() -> Result<(), MulescanError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init()
        .map_err(|e| MulescanError::Logging(format!("Failed to install subscriber: {}", e)))?;

    FILTER_HANDLE
        .set(handle)
        .map_err(|_| MulescanError::Logging("Subscriber already initialized".to_string()))
}

/// Cap the HTTP stack's log targets at `info`.
///
/// Never fails: problems are logged at debug and swallowed.
pub fn suppress_transport_logs() {
    if let Err(e) = try_suppress_transport_logs() {
        debug!("Couldn't set log threshold: {}", e);
    }
}

fn try_suppress_transport_logs() -> Result<(), MulescanError> {
    let handle = FILTER_HANDLE
        .get()
        .ok_or_else(|| MulescanError::Logging("no reloadable filter installed".to_string()))?;

    let directives = transport_directives()?;
    handle
        .modify(|filter| {
            let mut updated = EnvFilter::new(filter.to_string());
            for directive in directives {
                updated = updated.add_directive(directive);
            }
            *filter = updated;
        })
        .map_err(|e| MulescanError::Logging(e.to_string()))
}

fn transport_directives() -> Result<Vec<Directive>, MulescanError> {
    TRANSPORT_TARGETS
        .iter()
        .map(|target| {
            format!("{}=info", target)
                .parse::<Directive>()
                .map_err(|e| MulescanError::Logging(e.to_string()))
        })
        .collect()
}
