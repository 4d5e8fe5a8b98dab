//! DrawKit Settings Crate
//!
//! Holds the cross-cutting defaults used by path editing and creation, and
//! persists them as JSON or TOML.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{
    Config, CreationSettings, HistorySettings, HitTestingSettings, JoinSettings, MetricsSettings,
};
pub use error::{SettingsError, SettingsResult};
pub use persistence::SettingsStore;
