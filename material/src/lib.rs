//! Package-repository material adapter for an MLflow tracking server.
//!
//! The host orchestrator polls this adapter with named requests carrying a
//! flat key/value configuration payload. The adapter answers with
//! configuration-field metadata, validation results, or the outcome of a
//! connectivity probe against the configured tracking server.

pub mod config;
pub mod connection;
pub mod errors;
pub mod plugin;

pub use errors::MaterialError;
pub use plugin::{MaterialPlugin, RequestName};
