//! The validated test environment.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::adapter::{AdapterEnv, DriverAdapter, DriverAdapterConfig};
use crate::connector::Connector;
use crate::error::EnvResult;
use crate::executor::ExecutorEnv;
use crate::keys;
use crate::raw::RawEnv;
use crate::source::EnvSource;
use crate::validator::validate_env;

/// Typed configuration for a driver adapter test run.
///
/// Combines three independent axes: the driver adapter (with its config
/// when proxied), the test executor, and the connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Env {
    adapter: AdapterEnv,
    executor: ExecutorEnv,
    connector: Connector,
}

impl Env {
    /// Assemble an environment from already-validated parts.
    pub fn new(adapter: AdapterEnv, executor: ExecutorEnv, connector: Connector) -> Self {
        Self {
            adapter,
            executor,
            connector,
        }
    }

    /// Validate a raw environment.
    pub fn from_raw(raw: &RawEnv) -> EnvResult<Self> {
        validate_env(raw)
    }

    /// Validate the recognized keys of an [`EnvSource`].
    pub fn from_source<S: EnvSource + ?Sized>(source: &S) -> EnvResult<Self> {
        Self::from_raw(&RawEnv::from_source(source))
    }

    /// Validate string pairs, such as `std::env::vars()`.
    pub fn from_vars<I, K, V>(vars: I) -> EnvResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::from_raw(&RawEnv::from_vars(vars))
    }

    /// The adapter axis.
    pub fn adapter(&self) -> &AdapterEnv {
        &self.adapter
    }

    /// The driver adapter tag.
    pub fn driver_adapter(&self) -> DriverAdapter {
        self.adapter.adapter()
    }

    /// The adapter config, for proxied adapters.
    pub fn adapter_config(&self) -> Option<&DriverAdapterConfig> {
        self.adapter.config()
    }

    /// The executor axis.
    pub fn executor(&self) -> &ExecutorEnv {
        &self.executor
    }

    /// The emulator URL, for the mobile executor.
    pub fn mobile_emulator_url(&self) -> Option<&str> {
        self.executor.mobile_emulator_url()
    }

    /// The connector.
    pub fn connector(&self) -> Connector {
        self.connector
    }

    /// Encode back into environment variables, defaults applied.
    pub fn to_vars(&self) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();
        vars.insert(
            keys::DRIVER_ADAPTER.to_string(),
            self.driver_adapter().as_str().to_string(),
        );
        if let Some(config) = self.adapter_config() {
            vars.insert(
                keys::DRIVER_ADAPTER_CONFIG.to_string(),
                config.to_json_string(),
            );
        }
        vars.insert(
            keys::EXTERNAL_TEST_EXECUTOR.to_string(),
            self.executor.as_str().to_string(),
        );
        if let Some(url) = self.mobile_emulator_url() {
            vars.insert(keys::MOBILE_EMULATOR_URL.to_string(), url.to_string());
        }
        vars.insert(
            keys::CONNECTOR.to_string(),
            self.connector.as_str().to_string(),
        );
        vars
    }

    /// Encode as a raw environment.
    pub fn to_raw(&self) -> RawEnv {
        RawEnv::from_vars(self.to_vars())
    }
}

impl Serialize for Env {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.to_vars())
    }
}

impl<'de> Deserialize<'de> for Env {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let vars = Map::<String, Value>::deserialize(deserializer)?;
        Env::from_raw(&vars.into_iter().collect()).map_err(|err| {
            let details: Vec<String> = err.violations().iter().map(ToString::to_string).collect();
            D::Error::custom(format!("{}: {}", err, details.join("; ")))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{ExternalTestExecutor, MobileAdapterConfig};
    use crate::source::MapEnvSource;
    use pretty_assertions::assert_eq;

    fn planetscale_mobile() -> Env {
        Env::new(
            AdapterEnv::PlanetScale {
                config: DriverAdapterConfig::new("http://127.0.0.1:8085").unwrap(),
            },
            ExecutorEnv::Mobile(MobileAdapterConfig::new("http://10.0.2.2:3000").unwrap()),
            Connector::Vitess,
        )
    }

    #[test]
    fn test_to_vars_applies_default_executor() {
        let env = Env::from_vars([("DRIVER_ADAPTER", "pg"), ("CONNECTOR", "postgres")]).unwrap();
        let vars = env.to_vars();

        assert_eq!(vars.get("EXTERNAL_TEST_EXECUTOR").map(String::as_str), Some("Napi"));
        assert!(!vars.contains_key("DRIVER_ADAPTER_CONFIG"));
        assert!(!vars.contains_key("MOBILE_EMULATOR_URL"));
    }

    #[test]
    fn test_to_vars_encodes_config_as_json() {
        let vars = planetscale_mobile().to_vars();

        assert_eq!(
            vars.get("DRIVER_ADAPTER_CONFIG").map(String::as_str),
            Some(r#"{"proxy_url":"http://127.0.0.1:8085"}"#)
        );
        assert_eq!(
            vars.get("MOBILE_EMULATOR_URL").map(String::as_str),
            Some("http://10.0.2.2:3000")
        );
    }

    #[test]
    fn test_to_raw_revalidates_to_equal_env() {
        let env = planetscale_mobile();
        assert_eq!(Env::from_raw(&env.to_raw()).unwrap(), env);
    }

    #[test]
    fn test_from_source() {
        let source = MapEnvSource::new()
            .set("DRIVER_ADAPTER", "mariadb")
            .set("EXTERNAL_TEST_EXECUTOR", "QueryCompiler")
            .set("CONNECTOR", "mysql")
            .set("PATH", "/usr/bin");

        let env = Env::from_source(&source).unwrap();
        assert_eq!(env.driver_adapter(), DriverAdapter::Mariadb);
        assert_eq!(
            env.executor(),
            &ExecutorEnv::External(ExternalTestExecutor::QueryCompiler)
        );
        assert_eq!(env.connector(), Connector::MySql);
    }

    #[test]
    fn test_serde_round_trip() {
        let env = planetscale_mobile();
        let json = serde_json::to_value(&env).unwrap();

        assert_eq!(json["DRIVER_ADAPTER"], "planetscale");
        assert_eq!(json["CONNECTOR"], "vitess");

        let decoded: Env = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, env);
    }

    #[test]
    fn test_deserialize_reports_every_violation() {
        let err = serde_json::from_str::<Env>(
            r#"{"DRIVER_ADAPTER":"oracle","EXTERNAL_TEST_EXECUTOR":"Deno"}"#,
        )
        .unwrap_err();
        let message = err.to_string();

        assert!(message.contains("3 error(s)"));
        assert!(message.contains("unknown driver adapter `oracle`"));
        assert!(message.contains("unknown test executor `Deno`"));
        assert!(message.contains("unknown connector (not set)"));
    }

    #[test]
    fn test_deserialize_structured_config() {
        let env: Env = serde_json::from_str(
            r#"{
                "DRIVER_ADAPTER": "neon:ws",
                "DRIVER_ADAPTER_CONFIG": { "proxy_url": "http://x" },
                "CONNECTOR": "postgres"
            }"#,
        )
        .unwrap();

        assert_eq!(env.adapter_config().unwrap().proxy_url(), "http://x");
    }
}
