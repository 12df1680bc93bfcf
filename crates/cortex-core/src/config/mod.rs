//! Configuration system — schema, resolution, and override-file merging.
//!
//! # Usage
//! ```no_run
//! use cortex_core::config::load_config;
//!
//! let cfg = load_config(None).expect("invalid configuration");
//! println!("model: {}", cfg.model.model_name);
//! ```

mod env_file;
pub mod error;
pub mod loader;
pub mod schema;

// Re-export key types
pub use error::ConfigError;
pub use loader::{load_config, resolve, EnvSource};
pub use schema::{AppConfig, MemoryConfig, ModelConfig};
