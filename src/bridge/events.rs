//! Host event model
//!
//! Events arrive from the host runtime as one JSON object per transport
//! line, tagged by `type`. The tag values match the event names the host
//! runtime uses natively.

use serde::Deserialize;
use serde_json::Value;

use super::BridgeError;

/// An event raised by the host runtime.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum HostEvent {
    /// The host runtime finished booting.
    #[serde(rename = "ready")]
    Ready,

    /// The watch app sent a message; `payload` carries its key/value
    /// content.
    #[serde(rename = "appmessage")]
    AppMessage { payload: Value },

    /// The host wants the configuration page opened.
    #[serde(rename = "showConfiguration")]
    ShowConfiguration,

    /// The configuration web view was dismissed, possibly with a response.
    #[serde(rename = "webviewclosed")]
    WebviewClosed {
        #[serde(default)]
        response: Option<String>,
    },
}

impl HostEvent {
    /// Parse a single transport line.
    pub fn from_line(line: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(line)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_ready() {
        let event = HostEvent::from_line(r#"{"type": "ready"}"#).unwrap();
        assert!(matches!(event, HostEvent::Ready));
    }

    #[test]
    fn test_parses_appmessage_with_payload() {
        let event =
            HostEvent::from_line(r#"{"type": "appmessage", "payload": {"action": 1}}"#).unwrap();
        match event {
            HostEvent::AppMessage { payload } => {
                assert_eq!(payload["action"], 1);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_parses_show_configuration() {
        let event = HostEvent::from_line(r#"{"type": "showConfiguration"}"#).unwrap();
        assert!(matches!(event, HostEvent::ShowConfiguration));
    }

    #[test]
    fn test_parses_webviewclosed_with_response() {
        let event =
            HostEvent::from_line(r#"{"type": "webviewclosed", "response": "{\"1\":\"0\"}"}"#)
                .unwrap();
        match event {
            HostEvent::WebviewClosed { response } => {
                assert_eq!(response.as_deref(), Some(r#"{"1":"0"}"#));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_webviewclosed_response_is_optional() {
        let event = HostEvent::from_line(r#"{"type": "webviewclosed"}"#).unwrap();
        match event {
            HostEvent::WebviewClosed { response } => assert_eq!(response, None),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_event_type() {
        assert!(HostEvent::from_line(r#"{"type": "reboot"}"#).is_err());
    }

    #[test]
    fn test_rejects_malformed_line() {
        assert!(HostEvent::from_line("not json").is_err());
    }
}
