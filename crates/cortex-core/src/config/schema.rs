//! Configuration schema — the typed shape, defaults, and field-level
//! constraints for each configuration layer.
//!
//! Hierarchy: `AppConfig` → `ModelConfig` + `MemoryConfig`.
//!
//! Instances are resolved once at process start (see `loader`) and never
//! mutated afterwards; consumers hold shared read-only references. Beyond
//! type coercion and the required-field checks in `validate`, values are
//! accepted as given: `temperature` is not clamped and `log_level` is not
//! checked against a closed set.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Placeholder graph-store password shipped in the defaults.
const PLACEHOLDER_GRAPH_PASSWORD: &str = "password";

// ─────────────────────────────────────────────
// Model
// ─────────────────────────────────────────────

/// Configuration for a single language-model backend and its fallbacks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model provider (e.g. `"openai"`, `"anthropic"`, `"llama"`).
    /// Any non-empty string is accepted; there is no provider enum.
    pub provider: String,
    /// Name of the model to use.
    pub model_name: String,
    /// API key for the provider. May be empty (local backends).
    pub api_key: String,
    /// Base URL override for API requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Maximum context length in tokens.
    pub context_length: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// Request timeout in seconds.
    pub timeout: u32,
    /// Fallback model identifiers, tried in declared order when the
    /// primary provider fails.
    pub fallback_models: Vec<String>,
    /// Whether to use streaming responses.
    pub streaming: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model_name: "gpt-4".to_string(),
            api_key: String::new(),
            api_base: None,
            context_length: 4096,
            temperature: 0.7,
            timeout: 60,
            fallback_models: Vec::new(),
            streaming: false,
        }
    }
}

impl ModelConfig {
    /// Check the required fields.
    ///
    /// `provider` and `model_name` must be non-empty; every other field has
    /// a documented default.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.is_empty() {
            return Err(ConfigError::MissingField { field: "provider" });
        }
        if self.model_name.is_empty() {
            return Err(ConfigError::MissingField { field: "model_name" });
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────
// Memory
// ─────────────────────────────────────────────

/// Connection endpoints and credentials for the three memory subsystems.
///
/// The endpoints are opaque strings handed to external collaborators; this
/// layer never connects to them. All fields are independently optional with
/// defaults pointing at local services.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Cache endpoint for episodic memory.
    pub episodic_memory_url: String,
    /// Filesystem path for the semantic memory vector store.
    pub semantic_memory_path: String,
    /// Graph database endpoint for procedural memory.
    pub procedural_memory_url: String,
    /// Graph database username.
    pub procedural_memory_user: String,
    /// Graph database password.
    pub procedural_memory_password: String,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            episodic_memory_url: "redis://localhost:6379/0".to_string(),
            semantic_memory_path: "./data/semantic".to_string(),
            procedural_memory_url: "bolt://localhost:7687".to_string(),
            procedural_memory_user: "neo4j".to_string(),
            procedural_memory_password: PLACEHOLDER_GRAPH_PASSWORD.to_string(),
        }
    }
}

impl MemoryConfig {
    /// Whether the graph-store password is still the shipped placeholder.
    ///
    /// The loader warns when this holds outside debug mode.
    pub fn uses_placeholder_credentials(&self) -> bool {
        self.procedural_memory_password == PLACEHOLDER_GRAPH_PASSWORD
    }
}

// ─────────────────────────────────────────────
// App (root)
// ─────────────────────────────────────────────

/// Root application configuration.
///
/// Exclusively owns its embedded model and memory sections — no sharing, no
/// back-references. Produced by `loader::load_config` exactly once per
/// process; a failed model section means no `AppConfig` at all.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Enable debug mode.
    pub debug: bool,
    /// Logging level (e.g. `"INFO"`, `"DEBUG"`).
    pub log_level: String,
    /// Port the embedding API server listens on.
    pub port: u16,
    /// Language-model backend settings.
    pub model: ModelConfig,
    /// Memory subsystem endpoints.
    pub memory: MemoryConfig,
    /// Maximum number of executor workers.
    pub max_workers: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "INFO".to_string(),
            port: 8000,
            model: ModelConfig::default(),
            memory: MemoryConfig::default(),
            max_workers: 5,
        }
    }
}

impl AppConfig {
    /// Validate the root and every embedded section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.model.validate()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_defaults() {
        let model = ModelConfig::default();
        assert_eq!(model.provider, "openai");
        assert_eq!(model.model_name, "gpt-4");
        assert_eq!(model.api_key, "");
        assert_eq!(model.api_base, None);
        assert_eq!(model.context_length, 4096);
        assert_eq!(model.temperature, 0.7);
        assert_eq!(model.timeout, 60);
        assert!(model.fallback_models.is_empty());
        assert!(!model.streaming);
    }

    #[test]
    fn test_memory_defaults() {
        let memory = MemoryConfig::default();
        assert_eq!(memory.episodic_memory_url, "redis://localhost:6379/0");
        assert_eq!(memory.semantic_memory_path, "./data/semantic");
        assert_eq!(memory.procedural_memory_url, "bolt://localhost:7687");
        assert_eq!(memory.procedural_memory_user, "neo4j");
        assert_eq!(memory.procedural_memory_password, "password");
    }

    #[test]
    fn test_app_defaults() {
        let config = AppConfig::default();
        assert!(!config.debug);
        assert_eq!(config.log_level, "INFO");
        assert_eq!(config.port, 8000);
        assert_eq!(config.max_workers, 5);
        assert_eq!(config.model, ModelConfig::default());
        assert_eq!(config.memory, MemoryConfig::default());
    }

    #[test]
    fn test_validate_empty_model_name() {
        let model = ModelConfig {
            model_name: String::new(),
            ..ModelConfig::default()
        };
        assert_eq!(
            model.validate(),
            Err(ConfigError::MissingField {
                field: "model_name"
            })
        );
    }

    #[test]
    fn test_validate_empty_provider() {
        let model = ModelConfig {
            provider: String::new(),
            ..ModelConfig::default()
        };
        assert_eq!(
            model.validate(),
            Err(ConfigError::MissingField { field: "provider" })
        );
    }

    #[test]
    fn test_app_validate_delegates_to_model() {
        let config = AppConfig {
            model: ModelConfig {
                provider: String::new(),
                ..ModelConfig::default()
            },
            ..AppConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingField { field: "provider" })
        );
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_placeholder_credentials() {
        let mut memory = MemoryConfig::default();
        assert!(memory.uses_placeholder_credentials());

        memory.procedural_memory_password = "s3cret".to_string();
        assert!(!memory.uses_placeholder_credentials());
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = AppConfig {
            port: 9090,
            model: ModelConfig {
                provider: "anthropic".to_string(),
                model_name: "claude-3-opus".to_string(),
                fallback_models: vec!["gpt-4".to_string()],
                ..ModelConfig::default()
            },
            ..AppConfig::default()
        };

        let json = serde_json::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_absent_api_base_not_serialized() {
        let json = serde_json::to_value(ModelConfig::default()).unwrap();
        assert!(json.get("api_base").is_none());
    }
}
