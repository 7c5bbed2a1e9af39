//! Names of the environment variables the validator recognizes.

/// Selects the driver adapter.
pub const DRIVER_ADAPTER: &str = "DRIVER_ADAPTER";

/// Adapter sub-configuration, as JSON text or a structured object.
pub const DRIVER_ADAPTER_CONFIG: &str = "DRIVER_ADAPTER_CONFIG";

/// Selects the runtime that executes test queries.
pub const EXTERNAL_TEST_EXECUTOR: &str = "EXTERNAL_TEST_EXECUTOR";

/// Emulator endpoint, only read for the mobile executor.
pub const MOBILE_EMULATOR_URL: &str = "MOBILE_EMULATOR_URL";

/// Selects the target database engine.
pub const CONNECTOR: &str = "CONNECTOR";

/// All recognized keys, in validation order.
pub const ALL: [&str; 5] = [
    DRIVER_ADAPTER,
    DRIVER_ADAPTER_CONFIG,
    EXTERNAL_TEST_EXECUTOR,
    MOBILE_EMULATOR_URL,
    CONNECTOR,
];
