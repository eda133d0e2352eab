//! Settings bridge core
//!
//! Relays a JSON settings blob between the SetPebble service, a local
//! last-value cache, and the host device:
//!
//! - replay the cached settings when the watch app asks
//! - refresh from the service in a detached task and forward the result
//! - open the configuration page on request
//! - persist and forward whatever the configuration page returns

mod error;
mod events;
mod handlers;

pub use error::*;
pub use events::*;
pub use handlers::*;
