//! Error types for environment validation.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

use crate::keys;

/// Result type for environment operations.
pub type EnvResult<T> = Result<T, EnvError>;

/// Errors that can occur while validating a test environment.
#[derive(Error, Debug, Diagnostic)]
pub enum EnvError {
    /// `DRIVER_ADAPTER` is missing or not a known adapter.
    #[error("unknown driver adapter {}", describe(.found))]
    #[diagnostic(
        code(testkit::env::unknown_driver_adapter),
        help("`DRIVER_ADAPTER` must be one of: planetscale, neon:ws, pg, libsql, d1, better-sqlite3, mssql, mariadb")
    )]
    UnknownDriverAdapter { found: Option<String> },

    /// `DRIVER_ADAPTER_CONFIG` was given as text that is not JSON.
    #[error("`DRIVER_ADAPTER_CONFIG` is not valid JSON")]
    #[diagnostic(
        code(testkit::env::malformed_adapter_config),
        help("expected a JSON object such as {{\"proxy_url\":\"http://127.0.0.1:8085\"}}")
    )]
    MalformedAdapterConfig {
        #[source]
        source: serde_json::Error,
    },

    /// `proxy_url` is missing or empty.
    #[error("invalid `proxy_url` in `DRIVER_ADAPTER_CONFIG`: {message}")]
    #[diagnostic(code(testkit::env::invalid_proxy_url))]
    InvalidProxyUrl { message: String },

    /// `MOBILE_EMULATOR_URL` is missing or empty for the mobile executor.
    #[error("invalid `MOBILE_EMULATOR_URL`: {message}")]
    #[diagnostic(
        code(testkit::env::invalid_mobile_emulator_url),
        help("`EXTERNAL_TEST_EXECUTOR=Mobile` requires `MOBILE_EMULATOR_URL`")
    )]
    InvalidMobileEmulatorUrl { message: String },

    /// `EXTERNAL_TEST_EXECUTOR` is set to an unknown executor.
    #[error("unknown test executor `{found}`")]
    #[diagnostic(
        code(testkit::env::unknown_executor),
        help("`EXTERNAL_TEST_EXECUTOR` must be one of: Mobile, Wasm, Napi, QueryCompiler")
    )]
    UnknownExecutor { found: String },

    /// `CONNECTOR` is missing or not a known connector.
    #[error("unknown connector {}", describe(.found))]
    #[diagnostic(
        code(testkit::env::unknown_connector),
        help("`CONNECTOR` must be one of: postgres, cockroachdb, sqlite, mysql, sqlserver, vitess")
    )]
    UnknownConnector { found: Option<String> },

    /// A value has the wrong type, or a required key is missing.
    #[error("`{key}` has the wrong shape: expected {expected}, found {found}")]
    #[diagnostic(code(testkit::env::schema_mismatch))]
    SchemaMismatch {
        key: String,
        expected: String,
        found: String,
    },

    /// Environment fixture is not valid JSON.
    #[error("failed to parse JSON environment")]
    #[diagnostic(code(testkit::env::json_error))]
    JsonError {
        #[source]
        source: serde_json::Error,
    },

    /// Environment fixture is not valid TOML.
    #[error("failed to parse TOML environment")]
    #[diagnostic(code(testkit::env::toml_error))]
    TomlError {
        #[source]
        source: toml::de::Error,
    },

    /// Validation error with multiple issues.
    #[error("environment validation failed with {count} error(s)")]
    #[diagnostic(code(testkit::env::validation_failed))]
    ValidationFailed {
        count: usize,
        #[related]
        errors: Vec<EnvError>,
    },
}

fn describe(found: &Option<String>) -> String {
    match found {
        Some(value) => format!("`{}`", value),
        None => "(not set)".to_string(),
    }
}

impl EnvError {
    /// Create an unknown driver adapter error.
    pub fn unknown_driver_adapter(found: Option<impl Into<String>>) -> Self {
        Self::UnknownDriverAdapter {
            found: found.map(Into::into),
        }
    }

    /// Create an invalid proxy URL error.
    pub fn invalid_proxy_url(message: impl Into<String>) -> Self {
        Self::InvalidProxyUrl {
            message: message.into(),
        }
    }

    /// Create an invalid mobile emulator URL error.
    pub fn invalid_mobile_emulator_url(message: impl Into<String>) -> Self {
        Self::InvalidMobileEmulatorUrl {
            message: message.into(),
        }
    }

    /// Create an unknown executor error.
    pub fn unknown_executor(found: impl Into<String>) -> Self {
        Self::UnknownExecutor {
            found: found.into(),
        }
    }

    /// Create an unknown connector error.
    pub fn unknown_connector(found: Option<impl Into<String>>) -> Self {
        Self::UnknownConnector {
            found: found.map(Into::into),
        }
    }

    /// Create a schema mismatch error.
    pub fn schema_mismatch(
        key: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::SchemaMismatch {
            key: key.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// The individual violations carried by this error.
    ///
    /// `ValidationFailed` yields its collected errors; every other variant
    /// yields itself.
    pub fn violations(&self) -> &[EnvError] {
        match self {
            Self::ValidationFailed { errors, .. } => errors,
            other => std::slice::from_ref(other),
        }
    }

    /// The environment key this error is about, if it concerns a single key.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::UnknownDriverAdapter { .. } => Some(keys::DRIVER_ADAPTER),
            Self::MalformedAdapterConfig { .. } | Self::InvalidProxyUrl { .. } => {
                Some(keys::DRIVER_ADAPTER_CONFIG)
            }
            Self::InvalidMobileEmulatorUrl { .. } => Some(keys::MOBILE_EMULATOR_URL),
            Self::UnknownExecutor { .. } => Some(keys::EXTERNAL_TEST_EXECUTOR),
            Self::UnknownConnector { .. } => Some(keys::CONNECTOR),
            Self::SchemaMismatch { key, .. } => Some(key),
            Self::JsonError { .. } | Self::TomlError { .. } | Self::ValidationFailed { .. } => {
                None
            }
        }
    }
}
