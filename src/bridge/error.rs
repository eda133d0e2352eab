//! Bridge failure taxonomy
//!
//! Every failure the original script swallowed inline is represented here so
//! callers and tests can observe it. The event handlers remain the single
//! swallow point: they log these at debug level and move on.

use thiserror::Error;

/// Failures a bridge operation can observe before discarding them.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A payload from the cache, the service, or the web view was not
    /// valid JSON.
    #[error("invalid settings payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// Transport-level HTTP failure reaching the service.
    #[error("settings request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a status other than 200.
    #[error("unexpected status {0} from settings service")]
    Status(reqwest::StatusCode),

    /// The settings cache could not be read or written.
    #[error("settings cache: {0}")]
    Store(#[source] std::io::Error),

    /// An outgoing message could not be delivered to the host runtime.
    #[error("host link: {0}")]
    Host(#[source] std::io::Error),
}
