//! Typed failures for configuration resolution.

use thiserror::Error;

/// Errors produced while resolving configuration.
///
/// Both variants are construction-time failures surfaced synchronously to
/// the loader's caller. Malformed configuration is static, so there is no
/// retry path: a failing section prevents the root config from being
/// produced, and the only reasonable disposition is to abort startup.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required field is absent or empty after defaults were applied.
    #[error("missing required configuration field `{field}`")]
    MissingField { field: &'static str },

    /// A raw value could not be coerced to the declared field type.
    #[error("invalid value `{value}` for `{field}` (from {var}): expected {expected}")]
    InvalidType {
        field: &'static str,
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}
