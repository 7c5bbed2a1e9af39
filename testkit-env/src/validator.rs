//! Environment validation.
//!
//! Every axis is checked on each run and all violations are reported
//! together:
//! - `DRIVER_ADAPTER` and, for proxied adapters, `DRIVER_ADAPTER_CONFIG`
//! - `EXTERNAL_TEST_EXECUTOR` and, for `Mobile`, `MOBILE_EMULATOR_URL`
//! - `CONNECTOR`

use serde_json::Value;
use tracing::debug;

use crate::adapter::{AdapterEnv, DriverAdapter, DriverAdapterConfig};
use crate::connector::Connector;
use crate::env::Env;
use crate::error::{EnvError, EnvResult};
use crate::executor::{ExecutorEnv, ExternalTestExecutor, MOBILE, MobileAdapterConfig};
use crate::keys;
use crate::raw::{RawEnv, describe_value};

/// Environment validator.
#[derive(Debug)]
pub struct Validator {
    /// Collected validation errors.
    errors: Vec<EnvError>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self { errors: vec![] }
    }

    /// Validate a raw environment and return the typed environment or errors.
    pub fn validate(&mut self, raw: &RawEnv) -> EnvResult<Env> {
        self.errors.clear();

        let adapter = self.check_adapter(raw);
        let executor = self.check_executor(raw);
        let connector = self.check_connector(raw);

        match (adapter, executor, connector) {
            (Some(adapter), Some(executor), Some(connector)) if self.errors.is_empty() => {
                let env = Env::new(adapter, executor, connector);
                debug!(
                    adapter = %env.driver_adapter(),
                    executor = %env.executor(),
                    connector = %env.connector(),
                    "environment validated"
                );
                Ok(env)
            }
            _ => {
                debug!(count = self.errors.len(), "environment validation failed");
                Err(EnvError::ValidationFailed {
                    count: self.errors.len(),
                    errors: std::mem::take(&mut self.errors),
                })
            }
        }
    }

    /// Check `DRIVER_ADAPTER` and the config it may require.
    fn check_adapter(&mut self, raw: &RawEnv) -> Option<AdapterEnv> {
        let tag = match self.record(text(raw, keys::DRIVER_ADAPTER))? {
            Some(tag) => tag,
            None => {
                self.errors.push(EnvError::unknown_driver_adapter(None::<String>));
                return None;
            }
        };
        let adapter: DriverAdapter = self.record(tag.parse())?;

        let config = match raw.get(keys::DRIVER_ADAPTER_CONFIG) {
            Some(_) if !adapter.requires_config() => {
                debug!(%adapter, "ignoring DRIVER_ADAPTER_CONFIG for a direct adapter");
                None
            }
            Some(value) => Some(self.record(adapter_config(value))?),
            None => None,
        };

        self.record(AdapterEnv::new(adapter, config))
    }

    /// Check `EXTERNAL_TEST_EXECUTOR` and the mobile emulator URL.
    fn check_executor(&mut self, raw: &RawEnv) -> Option<ExecutorEnv> {
        match self.record(text(raw, keys::EXTERNAL_TEST_EXECUTOR))? {
            None => {
                debug!("EXTERNAL_TEST_EXECUTOR not set, defaulting to Napi");
                Some(ExecutorEnv::default())
            }
            Some(MOBILE) => match self.record(text(raw, keys::MOBILE_EMULATOR_URL))? {
                Some(url) => self
                    .record(MobileAdapterConfig::new(url))
                    .map(ExecutorEnv::Mobile),
                None => {
                    self.errors.push(EnvError::invalid_mobile_emulator_url(
                        "`MOBILE_EMULATOR_URL` is missing",
                    ));
                    None
                }
            },
            Some(name) => self
                .record(name.parse::<ExternalTestExecutor>())
                .map(ExecutorEnv::External),
        }
    }

    /// Check `CONNECTOR`.
    fn check_connector(&mut self, raw: &RawEnv) -> Option<Connector> {
        match self.record(text(raw, keys::CONNECTOR))? {
            Some(name) => self.record(name.parse()),
            None => {
                self.errors.push(EnvError::unknown_connector(None::<String>));
                None
            }
        }
    }

    /// Keep the value, or collect the error.
    fn record<T>(&mut self, result: EnvResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.errors.push(err);
                None
            }
        }
    }
}

/// Validate a raw environment.
pub fn validate_env(raw: &RawEnv) -> EnvResult<Env> {
    Validator::new().validate(raw)
}

/// Read a string variable. Absent is `Ok(None)`, any other type a mismatch.
fn text<'r>(raw: &'r RawEnv, key: &str) -> EnvResult<Option<&'r str>> {
    match raw.get(key) {
        None => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(other) => Err(EnvError::schema_mismatch(
            key,
            "a string",
            describe_value(other),
        )),
    }
}

/// Accept `DRIVER_ADAPTER_CONFIG` as JSON text or as an object.
fn adapter_config(value: &Value) -> EnvResult<DriverAdapterConfig> {
    match value {
        Value::String(text) => DriverAdapterConfig::from_json_str(text),
        Value::Object(_) => DriverAdapterConfig::from_value(value),
        other => Err(EnvError::schema_mismatch(
            keys::DRIVER_ADAPTER_CONFIG,
            "JSON text or an object",
            describe_value(other),
        )),
    }
}
