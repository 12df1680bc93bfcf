//! Config loader — captures the process environment, merges an optional
//! override file, and resolves the typed `AppConfig`.
//!
//! # Resolution precedence
//! 1. Documented defaults (the schema `Default` impls)
//! 2. Process environment variables
//! 3. Override-file entries (`./.env` or an explicit path), which win over
//!    the process environment for the keys they define
//!
//! Resolution runs once, at process start, before any workers are spawned.
//! It is synchronous and pure in-memory apart from the single override-file
//! read: no network I/O, no connections to the backends it describes.
//!
//! Malformed numeric values are hard errors, not silent fallbacks — a
//! typo'd `PORT` must stop startup instead of quietly running on 8000.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, warn};

use super::env_file::parse_env_file;
use super::error::ConfigError;
use super::schema::{AppConfig, MemoryConfig, ModelConfig};

/// Default override-file path, relative to the working directory.
const DEFAULT_ENV_FILE: &str = ".env";

// ─────────────────────────────────────────────
// Environment snapshot
// ─────────────────────────────────────────────

/// An owned snapshot of an environment-variable table.
///
/// Resolution is a pure function of one of these, so tests feed synthetic
/// tables instead of mutating the process environment, and nothing in the
/// crate does ambient `std::env` lookups after the snapshot is taken.
#[derive(Clone, Debug, Default)]
pub struct EnvSource {
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Look up a variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Insert or replace a variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Merge an override file into the snapshot.
    ///
    /// Entries defined in the file win over existing values; keys the file
    /// does not mention keep whatever the snapshot already had. An
    /// unreadable file is logged and skipped, and resolution continues from
    /// the snapshot alone.
    pub fn merge_env_file(&mut self, path: &Path) {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!("failed to read override file {}: {}", path.display(), e);
                return;
            }
        };

        let entries = parse_env_file(&content);
        debug!(
            "merging {} override entries from {}",
            entries.len(),
            path.display()
        );
        for (key, value) in entries {
            self.vars.insert(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ─────────────────────────────────────────────
// Coercion helpers
// ─────────────────────────────────────────────

/// Strict-parse a numeric variable, keeping `default` when it is absent.
///
/// A present-but-unparseable value surfaces as `InvalidType` naming the
/// target field and the raw value.
fn parse_var<T: FromStr>(
    env: &EnvSource,
    var: &'static str,
    field: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match env.get(var) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidType {
            field,
            var,
            value: raw.to_string(),
            expected,
        }),
        None => Ok(default),
    }
}

/// A boolean variable is true only when the lower-cased raw value equals
/// `"true"` exactly; every other value (including `"1"` and `"yes"`) is
/// false. Absent keeps the default.
fn parse_bool(env: &EnvSource, var: &str, default: bool) -> bool {
    match env.get(var) {
        Some(raw) => raw.to_lowercase() == "true",
        None => default,
    }
}

/// Comma-split list variable. Absent or empty resolves to an empty list,
/// never to a list containing one empty string.
fn parse_list(env: &EnvSource, var: &str) -> Vec<String> {
    match env.get(var) {
        Some(raw) if !raw.is_empty() => raw.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

// ─────────────────────────────────────────────
// Section resolution
// ─────────────────────────────────────────────

/// Resolve the model section from a snapshot.
///
/// Resolved first: a failure here must prevent the root config from being
/// produced at all. `timeout` has no environment mapping and stays at its
/// default through this path.
pub fn resolve_model(env: &EnvSource) -> Result<ModelConfig, ConfigError> {
    let mut model = ModelConfig::default();

    if let Some(v) = env.get("LLM_PROVIDER") {
        model.provider = v.to_string();
    }
    if let Some(v) = env.get("LLM_MODEL") {
        model.model_name = v.to_string();
    }
    if let Some(v) = env.get("LLM_API_KEY") {
        model.api_key = v.to_string();
    }
    if let Some(v) = env.get("LLM_API_BASE") {
        model.api_base = Some(v.to_string());
    }
    model.context_length = parse_var(
        env,
        "LLM_CONTEXT_LENGTH",
        "context_length",
        "integer",
        model.context_length,
    )?;
    model.temperature = parse_var(
        env,
        "LLM_TEMPERATURE",
        "temperature",
        "float",
        model.temperature,
    )?;
    model.fallback_models = parse_list(env, "LLM_FALLBACK_MODELS");
    model.streaming = parse_bool(env, "LLM_STREAMING", model.streaming);

    model.validate()?;
    Ok(model)
}

/// Resolve the memory section from a snapshot.
///
/// Every field is optional with a default, so this cannot fail.
pub fn resolve_memory(env: &EnvSource) -> MemoryConfig {
    let mut memory = MemoryConfig::default();

    if let Some(v) = env.get("REDIS_URL") {
        memory.episodic_memory_url = v.to_string();
    }
    if let Some(v) = env.get("SEMANTIC_MEMORY_PATH") {
        memory.semantic_memory_path = v.to_string();
    }
    if let Some(v) = env.get("NEO4J_URL") {
        memory.procedural_memory_url = v.to_string();
    }
    if let Some(v) = env.get("NEO4J_USER") {
        memory.procedural_memory_user = v.to_string();
    }
    if let Some(v) = env.get("NEO4J_PASSWORD") {
        memory.procedural_memory_password = v.to_string();
    }

    memory
}

/// Resolve the full configuration from a snapshot.
///
/// Sections resolve bottom-up — model, then memory, then the root that
/// embeds both. The first error aborts resolution, so no partially valid
/// config ever escapes. Resolving the same snapshot twice yields equal
/// values.
pub fn resolve(env: &EnvSource) -> Result<AppConfig, ConfigError> {
    let model = resolve_model(env)?;
    let memory = resolve_memory(env);

    let mut config = AppConfig {
        model,
        memory,
        ..AppConfig::default()
    };
    config.debug = parse_bool(env, "DEBUG", config.debug);
    if let Some(v) = env.get("LOG_LEVEL") {
        config.log_level = v.to_string();
    }
    config.port = parse_var(env, "PORT", "port", "integer", config.port)?;
    config.max_workers = parse_var(env, "MAX_WORKERS", "max_workers", "integer", config.max_workers)?;

    config.validate()?;

    if !config.debug && config.memory.uses_placeholder_credentials() {
        warn!("graph-store password is the shipped placeholder; set NEO4J_PASSWORD before deploying");
    }

    Ok(config)
}

// ─────────────────────────────────────────────
// Entry point
// ─────────────────────────────────────────────

/// Load configuration from the process environment.
///
/// `env_file` points at an optional `KEY=value` override file; when `None`,
/// `./.env` is merged if it exists. The returned value is the immutable
/// configuration for the process lifetime — pass it to consumers by
/// reference (or wrap it in an `Arc`) instead of re-resolving.
pub fn load_config(env_file: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut env = EnvSource::from_process();

    match env_file {
        Some(path) => env.merge_env_file(path),
        None => {
            let default_path = Path::new(DEFAULT_ENV_FILE);
            if default_path.exists() {
                env.merge_env_file(default_path);
            }
        }
    }

    resolve(&env)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
