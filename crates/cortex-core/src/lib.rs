//! Cortex core — configuration schema, resolution, and logging bootstrap.
//!
//! This crate turns the process environment into one immutable, validated
//! [`AppConfig`] consumed by the rest of the system. Resolution happens
//! exactly once, at startup; a failure means there is no safe partial
//! configuration and the process should abort:
//!
//! ```no_run
//! fn main() -> Result<(), cortex_core::ConfigError> {
//!     let cfg = cortex_core::config::load_config(None)?;
//!     cortex_core::logging::init(&cfg);
//!     println!("listening on port {}", cfg.port);
//!     Ok(())
//! }
//! ```
//!
//! Consumers receive the resolved value by reference (or `Arc` when shared
//! across threads) and treat every field as read-only — there is no
//! mutation path and no re-resolution after startup.

pub mod config;
pub mod logging;

pub use config::{load_config, AppConfig, ConfigError, EnvSource, MemoryConfig, ModelConfig};
