//! JSON-lines host transport over stdio
//!
//! The bridge normally lives inside a phone runtime that delivers events
//! natively. Run standalone, events arrive as one JSON object per stdin
//! line and outgoing frames leave on stdout the same way. Logs go to
//! stderr so the frame stream stays clean.

use std::io::Write;

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::bridge::{Bridge, BridgeError, HostEvent};
use crate::store::SettingsStore;

use super::{HostLink, OutgoingMessage};

/// Host link backed by the process stdio streams.
pub struct StdioHost {
    account_token: String,
}

impl StdioHost {
    /// Create a host link presenting the given account identifier.
    pub fn new(account_token: impl Into<String>) -> Self {
        Self {
            account_token: account_token.into(),
        }
    }

    fn write_frame(&self, frame: &OutgoingMessage) -> Result<(), BridgeError> {
        let line = serde_json::to_string(frame)?;
        let mut out = std::io::stdout().lock();
        writeln!(out, "{line}").map_err(BridgeError::Host)?;
        out.flush().map_err(BridgeError::Host)
    }
}

impl HostLink for StdioHost {
    fn account_token(&self) -> String {
        self.account_token.clone()
    }

    fn send_app_message(&self, payload: &Value) -> Result<(), BridgeError> {
        self.write_frame(&OutgoingMessage::AppMessage {
            payload: payload.clone(),
        })
    }

    fn open_url(&self, url: &str) -> Result<(), BridgeError> {
        self.write_frame(&OutgoingMessage::OpenUrl {
            url: url.to_string(),
        })
    }
}

/// Drive a bridge from newline-delimited JSON events on stdin until EOF.
///
/// Malformed or unrecognized lines are logged and skipped; the loop only
/// ends when the host closes the stream. Refresh tasks spawned along the
/// way are left to finish on their own.
pub async fn run_event_loop<S, H>(bridge: &Bridge<S, H>) -> Result<()>
where
    S: SettingsStore + 'static,
    H: HostLink + 'static,
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read host event")?
    {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match HostEvent::from_line(line) {
            Ok(event) => {
                let _ = bridge.dispatch(event).await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unrecognized host event");
            }
        }
    }

    tracing::info!("Host closed the event stream");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_app_message_frame_format() {
        let frame = OutgoingMessage::AppMessage {
            payload: json!({"1": "0"}),
        };
        let line = serde_json::to_string(&frame).unwrap();
        let parsed: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(parsed["type"], "appMessage");
        assert_eq!(parsed["payload"], json!({"1": "0"}));
    }

    #[test]
    fn test_open_url_frame_format() {
        let frame = OutgoingMessage::OpenUrl {
            url: "http://x.SetPebble.com/WUMT/abc".to_string(),
        };
        let line = serde_json::to_string(&frame).unwrap();
        let parsed: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(parsed["type"], "openUrl");
        assert_eq!(parsed["url"], "http://x.SetPebble.com/WUMT/abc");
    }

    #[test]
    fn test_frames_round_trip() {
        let frame = OutgoingMessage::AppMessage {
            payload: json!({"action": 1}),
        };
        let line = serde_json::to_string(&frame).unwrap();
        let back: OutgoingMessage = serde_json::from_str(&line).unwrap();
        assert_eq!(back, frame);
    }

    #[test]
    fn test_host_reports_account_token() {
        let host = StdioHost::new("8d6f5b2a9c1e4f70");
        assert_eq!(host.account_token(), "8d6f5b2a9c1e4f70");
    }
}
