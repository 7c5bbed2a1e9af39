//! Test executor selection.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{EnvError, EnvResult};

/// Executor value that selects the mobile emulator.
pub const MOBILE: &str = "Mobile";

/// Non-mobile runtimes for test queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExternalTestExecutor {
    /// Query engine compiled to WebAssembly.
    Wasm,
    /// Native Node-API library.
    #[default]
    Napi,
    /// Query compiler.
    QueryCompiler,
}

impl ExternalTestExecutor {
    /// Every non-mobile executor.
    pub const ALL: [ExternalTestExecutor; 3] = [Self::Wasm, Self::Napi, Self::QueryCompiler];

    /// Get the executor name as used in `EXTERNAL_TEST_EXECUTOR`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wasm => "Wasm",
            Self::Napi => "Napi",
            Self::QueryCompiler => "QueryCompiler",
        }
    }
}

impl FromStr for ExternalTestExecutor {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|executor| executor.as_str() == s)
            .ok_or_else(|| EnvError::unknown_executor(s))
    }
}

impl std::fmt::Display for ExternalTestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settings for running tests against a mobile emulator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MobileAdapterConfig {
    emulator_url: String,
}

impl MobileAdapterConfig {
    /// Create a mobile config, rejecting an empty emulator URL.
    pub fn new(emulator_url: impl Into<String>) -> EnvResult<Self> {
        let emulator_url = emulator_url.into();
        if emulator_url.is_empty() {
            return Err(EnvError::invalid_mobile_emulator_url(
                "`MOBILE_EMULATOR_URL` must not be empty",
            ));
        }
        Ok(Self { emulator_url })
    }

    /// The emulator endpoint.
    pub fn emulator_url(&self) -> &str {
        &self.emulator_url
    }
}

/// The executor axis of a validated environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorEnv {
    /// `EXTERNAL_TEST_EXECUTOR=Mobile` with its emulator.
    Mobile(MobileAdapterConfig),
    /// Any other executor, `Napi` when unset.
    External(ExternalTestExecutor),
}

impl Default for ExecutorEnv {
    fn default() -> Self {
        Self::External(ExternalTestExecutor::default())
    }
}

impl ExecutorEnv {
    /// The value written to `EXTERNAL_TEST_EXECUTOR`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile(_) => MOBILE,
            Self::External(executor) => executor.as_str(),
        }
    }

    /// Whether tests run on the mobile emulator.
    pub fn is_mobile(&self) -> bool {
        matches!(self, Self::Mobile(_))
    }

    /// The emulator endpoint, for the mobile executor only.
    pub fn mobile_emulator_url(&self) -> Option<&str> {
        match self {
            Self::Mobile(config) => Some(config.emulator_url()),
            Self::External(_) => None,
        }
    }
}

impl std::fmt::Display for ExecutorEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_executor_is_napi() {
        assert_eq!(ExternalTestExecutor::default(), ExternalTestExecutor::Napi);
        assert_eq!(
            ExecutorEnv::default(),
            ExecutorEnv::External(ExternalTestExecutor::Napi)
        );
    }

    #[test]
    fn test_executor_parse() {
        assert_eq!(
            "QueryCompiler".parse::<ExternalTestExecutor>().unwrap(),
            ExternalTestExecutor::QueryCompiler
        );
        assert_eq!(
            "Wasm".parse::<ExternalTestExecutor>().unwrap(),
            ExternalTestExecutor::Wasm
        );
    }

    #[test]
    fn test_executor_parse_rejects_mobile_and_unknown() {
        // Mobile is a separate branch with its own required field
        assert!(MOBILE.parse::<ExternalTestExecutor>().is_err());
        assert!("napi".parse::<ExternalTestExecutor>().is_err());
        assert!("".parse::<ExternalTestExecutor>().is_err());
    }

    #[test]
    fn test_mobile_config_requires_url() {
        let err = MobileAdapterConfig::new("").unwrap_err();
        assert!(matches!(err, EnvError::InvalidMobileEmulatorUrl { .. }));

        let config = MobileAdapterConfig::new("http://10.0.2.2:3000").unwrap();
        assert_eq!(config.emulator_url(), "http://10.0.2.2:3000");
    }

    #[test]
    fn test_executor_env_accessors() {
        let mobile = ExecutorEnv::Mobile(MobileAdapterConfig::new("http://emu").unwrap());
        assert!(mobile.is_mobile());
        assert_eq!(mobile.as_str(), "Mobile");
        assert_eq!(mobile.mobile_emulator_url(), Some("http://emu"));

        let wasm = ExecutorEnv::External(ExternalTestExecutor::Wasm);
        assert!(!wasm.is_mobile());
        assert_eq!(wasm.to_string(), "Wasm");
        assert_eq!(wasm.mobile_emulator_url(), None);
    }
}
