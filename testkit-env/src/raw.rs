//! Untyped environment input.

use serde_json::{Map, Value};

use crate::error::{EnvError, EnvResult};
use crate::keys;
use crate::source::EnvSource;

/// Environment variables as they arrive, before validation.
///
/// Values are usually strings. `DRIVER_ADAPTER_CONFIG` may also be a
/// structured object when the environment is assembled in-process.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEnv {
    vars: Map<String, Value>,
}

impl RawEnv {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a variable, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Build from string pairs, such as `std::env::vars()`.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        }
    }

    /// Collect the recognized keys from an [`EnvSource`].
    pub fn from_source<S: EnvSource + ?Sized>(source: &S) -> Self {
        Self::from_vars(
            keys::ALL
                .into_iter()
                .filter_map(|key| source.get(key).map(|value| (key, value))),
        )
    }

    /// Parse a JSON object fixture.
    pub fn from_json_str(text: &str) -> EnvResult<Self> {
        let vars: Map<String, Value> =
            serde_json::from_str(text).map_err(|source| EnvError::JsonError { source })?;
        Ok(Self { vars })
    }

    /// Parse a TOML fixture. Tables become structured values.
    pub fn from_toml_str(text: &str) -> EnvResult<Self> {
        let vars: Map<String, Value> =
            toml::from_str(text).map_err(|source| EnvError::TomlError { source })?;
        Ok(Self { vars })
    }

    /// Get a variable.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether there are no variables.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over all variables.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.vars.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for RawEnv {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Short description of a JSON value's type for error messages.
pub(crate) fn describe_value(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
