//! Event handlers relaying settings between the service, the cache, and the
//! host device.

use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinHandle;

use crate::host::HostLink;
use crate::store::SettingsStore;

use super::{BridgeError, HostEvent};

/// Relays a settings payload between the SetPebble service, the local cache,
/// and the host device.
///
/// Clones are cheap and share the cache handle, the host link, and the HTTP
/// client. Refresh tasks run detached: overlapping triggers may complete in
/// any order, and the last response to arrive is the last one forwarded.
pub struct Bridge<S, H> {
    inner: Arc<Inner<S, H>>,
}

struct Inner<S, H> {
    token: String,
    base_url: String,
    client: reqwest::Client,
    store: S,
    host: H,
}

impl<S, H> Clone for Bridge<S, H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, H> Bridge<S, H>
where
    S: SettingsStore + 'static,
    H: HostLink + 'static,
{
    /// Create a bridge for one integration token against one service base
    /// URL.
    ///
    /// The HTTP client carries no overall timeout: a request that never
    /// completes never forwards anything.
    pub fn new(
        token: impl Into<String>,
        base_url: impl Into<String>,
        store: S,
        host: H,
    ) -> Result<Self, BridgeError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            inner: Arc::new(Inner {
                token: token.into(),
                base_url: base_url.into().trim_end_matches('/').to_string(),
                client,
                store,
                host,
            }),
        })
    }

    /// Route one host event to its handler.
    ///
    /// Returns the detached refresh task's handle when the event issued one,
    /// so embedders that care (tests, graceful shutdown) can await it.
    /// Dropping it keeps the fire-and-forget behavior.
    pub async fn dispatch(&self, event: HostEvent) -> Option<JoinHandle<()>> {
        match event {
            HostEvent::Ready => {
                self.on_ready();
                None
            }
            HostEvent::AppMessage { payload } => self.on_app_message(&payload).await,
            HostEvent::ShowConfiguration => {
                self.on_show_configuration();
                None
            }
            HostEvent::WebviewClosed { response } => {
                self.on_webview_closed(response.as_deref()).await;
                None
            }
        }
    }

    /// `ready`: the host runtime finished booting. Nothing to do.
    pub fn on_ready(&self) {
        tracing::trace!("host ready");
    }

    /// `appmessage`: replay the cached settings to the device, then refresh
    /// from the service in a detached task.
    ///
    /// The message must carry an `action` field; anything else is ignored.
    /// The replay completes before the refresh is issued. The refresh never
    /// writes the cache.
    pub async fn on_app_message(&self, payload: &Value) -> Option<JoinHandle<()>> {
        if payload.get("action").is_none() {
            return None;
        }

        match self.inner.replay_cached().await {
            Ok(true) => {}
            Ok(false) => tracing::debug!("no cached settings to replay"),
            Err(e) => tracing::debug!(error = %e, "cached settings dropped"),
        }

        let inner = Arc::clone(&self.inner);
        Some(tokio::spawn(async move {
            if let Err(e) = inner.refresh().await {
                tracing::debug!(error = %e, "settings refresh dropped");
            }
        }))
    }

    /// `showConfiguration`: open the configuration page in the host web
    /// view. The page's result, if any, arrives later as a webview-closed
    /// event.
    pub fn on_show_configuration(&self) {
        let url = self.inner.config_url();
        if let Err(e) = self.inner.host.open_url(&url) {
            tracing::warn!(error = %e, url = %url, "configuration page not opened");
        }
    }

    /// `webviewclosed`: accept the configuration page's response as the new
    /// settings. Empty or absent responses are ignored; an unparseable one
    /// forwards nothing and leaves the cache untouched.
    pub async fn on_webview_closed(&self, response: Option<&str>) {
        let Some(raw) = response.filter(|r| !r.is_empty()) else {
            return;
        };
        if let Err(e) = self.inner.accept_response(raw).await {
            tracing::debug!(error = %e, "webview response dropped");
        }
    }
}

impl<S, H> Inner<S, H>
where
    S: SettingsStore,
    H: HostLink,
{
    /// Forward the cached settings to the device. `Ok(false)` means the
    /// cache was empty. A corrupt entry is reported, not evicted; it stays
    /// until the next webview-closed overwrite.
    async fn replay_cached(&self) -> Result<bool, BridgeError> {
        let Some(raw) = self.store.get(&self.token).await? else {
            return Ok(false);
        };
        let payload: Value = serde_json::from_str(&raw)?;
        self.host.send_app_message(&payload)?;
        Ok(true)
    }

    /// Fetch fresh settings from the service and forward them. Only a 200
    /// counts; anything else resolves to nothing. Never touches the cache.
    async fn refresh(&self) -> Result<(), BridgeError> {
        let url = self.api_url(&self.host.account_token());
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(BridgeError::Status(status));
        }

        let body = response.text().await?;
        let payload: Value = serde_json::from_str(&body)?;
        self.host.send_app_message(&payload)?;
        Ok(())
    }

    /// Forward a configuration response and persist its raw form as the new
    /// cache value. Forwarding happens first, matching the host-side order;
    /// a failed cache write can therefore follow a delivered message.
    async fn accept_response(&self, raw: &str) -> Result<(), BridgeError> {
        let payload: Value = serde_json::from_str(raw)?;
        self.host.send_app_message(&payload)?;
        self.store.set(&self.token, raw).await?;
        Ok(())
    }

    fn api_url(&self, account: &str) -> String {
        format!("{}/api/{}/{}", self.base_url, self.token, account)
    }

    fn config_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            self.token,
            self.host.account_token()
        )
    }
}
