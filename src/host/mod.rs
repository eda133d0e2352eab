//! Host device link
//!
//! The host runtime is whatever delivers events to the bridge and accepts
//! messages back for the watch app. The bridge only ever needs three things
//! from it: the account identifier, message delivery, and a web view.

mod stdio;

pub use stdio::*;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bridge::BridgeError;

/// Frames the bridge hands to the host runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutgoingMessage {
    /// A settings payload forwarded to the watch app.
    AppMessage { payload: Value },

    /// A request to open the configuration page in the host web view.
    OpenUrl { url: String },
}

/// Connection to the host device runtime.
pub trait HostLink: Send + Sync {
    /// The per-install account identifier, read at event time.
    fn account_token(&self) -> String;

    /// Forward a settings payload to the watch app.
    fn send_app_message(&self, payload: &Value) -> Result<(), BridgeError>;

    /// Open a URL in the host web view.
    fn open_url(&self, url: &str) -> Result<(), BridgeError>;
}
