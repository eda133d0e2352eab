//! Bridge configuration management
//!
//! - Runtime settings from a TOML file with CLI/env overrides
//! - Account token persistence (create on first run, reuse afterwards)

mod account;
mod settings;

pub use account::*;
pub use settings::*;
