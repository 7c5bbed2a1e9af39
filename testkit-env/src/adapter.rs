//! Driver adapter selection and the adapter sub-configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::{EnvError, EnvResult};
use crate::keys;
use crate::raw::describe_value;

/// Driver adapter tag, the value of `DRIVER_ADAPTER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverAdapter {
    /// PlanetScale serverless driver.
    #[serde(rename = "planetscale")]
    PlanetScale,
    /// Neon serverless driver over WebSockets.
    #[serde(rename = "neon:ws")]
    NeonWs,
    /// node-postgres.
    #[serde(rename = "pg")]
    Pg,
    /// libSQL / Turso.
    #[serde(rename = "libsql")]
    Libsql,
    /// Cloudflare D1.
    #[serde(rename = "d1")]
    D1,
    /// better-sqlite3.
    #[serde(rename = "better-sqlite3")]
    BetterSqlite3,
    /// SQL Server (tedious).
    #[serde(rename = "mssql")]
    Mssql,
    /// MariaDB connector.
    #[serde(rename = "mariadb")]
    Mariadb,
}

impl DriverAdapter {
    /// Every adapter, in declaration order.
    pub const ALL: [DriverAdapter; 8] = [
        Self::PlanetScale,
        Self::NeonWs,
        Self::Pg,
        Self::Libsql,
        Self::D1,
        Self::BetterSqlite3,
        Self::Mssql,
        Self::Mariadb,
    ];

    /// Get the adapter name as used in `DRIVER_ADAPTER`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlanetScale => "planetscale",
            Self::NeonWs => "neon:ws",
            Self::Pg => "pg",
            Self::Libsql => "libsql",
            Self::D1 => "d1",
            Self::BetterSqlite3 => "better-sqlite3",
            Self::Mssql => "mssql",
            Self::Mariadb => "mariadb",
        }
    }

    /// Whether this adapter talks to its database through a proxy and
    /// therefore needs `DRIVER_ADAPTER_CONFIG`.
    pub fn requires_config(&self) -> bool {
        matches!(self, Self::PlanetScale | Self::NeonWs)
    }
}

impl FromStr for DriverAdapter {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|adapter| adapter.as_str() == s)
            .ok_or_else(|| EnvError::unknown_driver_adapter(Some(s)))
    }
}

impl std::fmt::Display for DriverAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sub-configuration for proxied adapters.
///
/// `proxy_url` is never empty, whichever way the value was built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DriverAdapterConfigFields")]
pub struct DriverAdapterConfig {
    proxy_url: String,
}

#[derive(Deserialize)]
struct DriverAdapterConfigFields {
    proxy_url: String,
}

impl TryFrom<DriverAdapterConfigFields> for DriverAdapterConfig {
    type Error = EnvError;

    fn try_from(fields: DriverAdapterConfigFields) -> Result<Self, Self::Error> {
        Self::new(fields.proxy_url)
    }
}

impl DriverAdapterConfig {
    /// Create a config, rejecting an empty proxy URL.
    pub fn new(proxy_url: impl Into<String>) -> EnvResult<Self> {
        let proxy_url = proxy_url.into();
        if proxy_url.is_empty() {
            return Err(EnvError::invalid_proxy_url("`proxy_url` must not be empty"));
        }
        Ok(Self { proxy_url })
    }

    /// The proxy endpoint the adapter connects through.
    pub fn proxy_url(&self) -> &str {
        &self.proxy_url
    }

    /// Parse the JSON text form, as it arrives from the environment.
    ///
    /// Text that is not JSON fails with `MalformedAdapterConfig`; parsed
    /// JSON is then checked exactly like [`DriverAdapterConfig::from_value`].
    pub fn from_json_str(text: &str) -> EnvResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|source| EnvError::MalformedAdapterConfig { source })?;
        Self::from_value(&value)
    }

    /// Check a structured value against the config shape.
    pub fn from_value(value: &Value) -> EnvResult<Self> {
        let Value::Object(fields) = value else {
            return Err(EnvError::schema_mismatch(
                keys::DRIVER_ADAPTER_CONFIG,
                "an object with `proxy_url`",
                describe_value(value),
            ));
        };

        match fields.get("proxy_url") {
            None => Err(EnvError::invalid_proxy_url("`proxy_url` is missing")),
            Some(Value::String(url)) => Self::new(url.as_str()),
            Some(other) => Err(EnvError::schema_mismatch(
                format!("{}.proxy_url", keys::DRIVER_ADAPTER_CONFIG),
                "a string",
                describe_value(other),
            )),
        }
    }

    /// Encode back into the JSON text form.
    pub fn to_json_string(&self) -> String {
        self.to_value().to_string()
    }

    /// Encode as a structured value.
    pub fn to_value(&self) -> Value {
        serde_json::json!({ "proxy_url": self.proxy_url })
    }
}

impl FromStr for DriverAdapterConfig {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json_str(s)
    }
}

impl std::fmt::Display for DriverAdapterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json_string())
    }
}

/// The adapter axis of a validated environment.
///
/// Proxied adapters carry their config; the rest carry nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterEnv {
    /// `planetscale`
    PlanetScale { config: DriverAdapterConfig },
    /// `neon:ws`
    NeonWs { config: DriverAdapterConfig },
    /// `pg`
    Pg,
    /// `libsql`
    Libsql,
    /// `d1`
    D1,
    /// `better-sqlite3`
    BetterSqlite3,
    /// `mssql`
    Mssql,
    /// `mariadb`
    Mariadb,
}

impl AdapterEnv {
    /// Pair an adapter with its config.
    ///
    /// Proxied adapters fail without a config. Other adapters drop it.
    pub fn new(adapter: DriverAdapter, config: Option<DriverAdapterConfig>) -> EnvResult<Self> {
        let missing = || {
            EnvError::schema_mismatch(
                keys::DRIVER_ADAPTER_CONFIG,
                format!("an adapter config for `{}`", adapter),
                "nothing",
            )
        };

        Ok(match adapter {
            DriverAdapter::PlanetScale => Self::PlanetScale {
                config: config.ok_or_else(missing)?,
            },
            DriverAdapter::NeonWs => Self::NeonWs {
                config: config.ok_or_else(missing)?,
            },
            DriverAdapter::Pg => Self::Pg,
            DriverAdapter::Libsql => Self::Libsql,
            DriverAdapter::D1 => Self::D1,
            DriverAdapter::BetterSqlite3 => Self::BetterSqlite3,
            DriverAdapter::Mssql => Self::Mssql,
            DriverAdapter::Mariadb => Self::Mariadb,
        })
    }

    /// The adapter tag.
    pub fn adapter(&self) -> DriverAdapter {
        match self {
            Self::PlanetScale { .. } => DriverAdapter::PlanetScale,
            Self::NeonWs { .. } => DriverAdapter::NeonWs,
            Self::Pg => DriverAdapter::Pg,
            Self::Libsql => DriverAdapter::Libsql,
            Self::D1 => DriverAdapter::D1,
            Self::BetterSqlite3 => DriverAdapter::BetterSqlite3,
            Self::Mssql => DriverAdapter::Mssql,
            Self::Mariadb => DriverAdapter::Mariadb,
        }
    }

    /// The adapter config, present only for proxied adapters.
    pub fn config(&self) -> Option<&DriverAdapterConfig> {
        match self {
            Self::PlanetScale { config } | Self::NeonWs { config } => Some(config),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_adapter_names_round_trip() {
        for adapter in DriverAdapter::ALL {
            assert_eq!(adapter.as_str().parse::<DriverAdapter>().unwrap(), adapter);
        }
    }

    #[test]
    fn test_adapter_from_str_is_exact() {
        assert!("PG".parse::<DriverAdapter>().is_err());
        assert!(" pg".parse::<DriverAdapter>().is_err());
        assert!("neon".parse::<DriverAdapter>().is_err());

        let err = "unknown-value".parse::<DriverAdapter>().unwrap_err();
        assert!(matches!(
            err,
            EnvError::UnknownDriverAdapter { found: Some(ref v) } if v == "unknown-value"
        ));
    }

    #[test]
    fn test_requires_config() {
        let proxied: Vec<_> = DriverAdapter::ALL
            .into_iter()
            .filter(DriverAdapter::requires_config)
            .collect();
        assert_eq!(proxied, vec![DriverAdapter::PlanetScale, DriverAdapter::NeonWs]);
    }

    #[test]
    fn test_adapter_serde_names() {
        let json = serde_json::to_string(&DriverAdapter::NeonWs).unwrap();
        assert_eq!(json, "\"neon:ws\"");

        let adapter: DriverAdapter = serde_json::from_str("\"better-sqlite3\"").unwrap();
        assert_eq!(adapter, DriverAdapter::BetterSqlite3);
    }

    #[test]
    fn test_config_from_json_str() {
        let config = DriverAdapterConfig::from_json_str(r#"{"proxy_url":"http://x"}"#).unwrap();
        assert_eq!(config.proxy_url(), "http://x");
    }

    #[test]
    fn test_config_string_and_object_forms_agree() {
        let from_text = DriverAdapterConfig::from_json_str(r#"{"proxy_url":"http://x"}"#).unwrap();
        let from_value =
            DriverAdapterConfig::from_value(&serde_json::json!({ "proxy_url": "http://x" }))
                .unwrap();
        assert_eq!(from_text, from_value);
    }

    #[test]
    fn test_config_rejects_empty_proxy_url() {
        let err = DriverAdapterConfig::from_json_str(r#"{"proxy_url":""}"#).unwrap_err();
        assert!(matches!(err, EnvError::InvalidProxyUrl { .. }));

        assert!(DriverAdapterConfig::new("").is_err());
    }

    #[test]
    fn test_config_rejects_missing_proxy_url() {
        let err = DriverAdapterConfig::from_json_str("{}").unwrap_err();
        assert!(matches!(err, EnvError::InvalidProxyUrl { .. }));
    }

    #[test]
    fn test_config_rejects_malformed_json() {
        let err = DriverAdapterConfig::from_json_str("{proxy_url: http://x").unwrap_err();
        assert!(matches!(err, EnvError::MalformedAdapterConfig { .. }));
    }

    #[test]
    fn test_config_rejects_wrong_shapes() {
        let err = DriverAdapterConfig::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, EnvError::SchemaMismatch { ref key, .. } if key == "DRIVER_ADAPTER_CONFIG"));

        let err = DriverAdapterConfig::from_json_str(r#"{"proxy_url": 8085}"#).unwrap_err();
        assert!(matches!(
            err,
            EnvError::SchemaMismatch { ref key, ref found, .. }
                if key == "DRIVER_ADAPTER_CONFIG.proxy_url" && found == "a number"
        ));
    }

    #[test]
    fn test_config_ignores_extra_fields() {
        let config =
            DriverAdapterConfig::from_json_str(r#"{"proxy_url":"http://x","timeout":5}"#).unwrap();
        assert_eq!(config.to_json_string(), r#"{"proxy_url":"http://x"}"#);
    }

    #[test]
    fn test_config_string_round_trip() {
        let config = DriverAdapterConfig::new("http://127.0.0.1:8085").unwrap();
        let reparsed: DriverAdapterConfig = config.to_json_string().parse().unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_config_serde_enforces_invariant() {
        let err = serde_json::from_str::<DriverAdapterConfig>(r#"{"proxy_url":""}"#).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));

        let config: DriverAdapterConfig =
            serde_json::from_str(r#"{"proxy_url":"http://x"}"#).unwrap();
        assert_eq!(config.proxy_url(), "http://x");
    }

    #[test]
    fn test_adapter_env_requires_config_for_proxied() {
        let err = AdapterEnv::new(DriverAdapter::PlanetScale, None).unwrap_err();
        assert!(matches!(err, EnvError::SchemaMismatch { .. }));

        let config = DriverAdapterConfig::new("http://x").unwrap();
        let env = AdapterEnv::new(DriverAdapter::NeonWs, Some(config.clone())).unwrap();
        assert_eq!(env.adapter(), DriverAdapter::NeonWs);
        assert_eq!(env.config(), Some(&config));
    }

    #[test]
    fn test_adapter_env_drops_config_for_direct() {
        let config = DriverAdapterConfig::new("http://x").unwrap();
        let env = AdapterEnv::new(DriverAdapter::Pg, Some(config)).unwrap();
        assert_eq!(env, AdapterEnv::Pg);
        assert_eq!(env.config(), None);
    }
}
