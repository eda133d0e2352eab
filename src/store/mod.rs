//! Settings cache storage
//!
//! The bridge never interprets cached settings. Whatever string the
//! configuration page returned is stored verbatim, keyed by the integration
//! token, and replayed later. Exactly one value exists per key; each write
//! replaces the previous value whole.

mod file;
mod memory;

pub use file::*;
pub use memory::*;

use std::future::Future;

use crate::bridge::BridgeError;

/// Last-value settings cache keyed by the integration token.
///
/// Implementations provide atomic get/set of a single serialized string per
/// key. The bridge performs no merging: last write wins.
pub trait SettingsStore: Send + Sync {
    /// Read the cached settings string for a key, if any.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, BridgeError>> + Send;

    /// Overwrite the cached settings string for a key.
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), BridgeError>> + Send;
}
