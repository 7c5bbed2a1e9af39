//! # Testkit
//!
//! Environment configuration for driver adapter test executors.
//!
//! A test run is selected by a handful of environment variables:
//! - `DRIVER_ADAPTER` picks the database client implementation
//! - `DRIVER_ADAPTER_CONFIG` carries the proxy settings of proxied adapters
//! - `EXTERNAL_TEST_EXECUTOR` picks the runtime, `Napi` by default
//! - `MOBILE_EMULATOR_URL` points the `Mobile` executor at its emulator
//! - `CONNECTOR` picks the database engine
//!
//! ## Quick Start
//!
//! ```rust
//! use testkit::prelude::*;
//!
//! let env = Env::from_vars([
//!     ("DRIVER_ADAPTER", "neon:ws"),
//!     ("DRIVER_ADAPTER_CONFIG", r#"{"proxy_url":"http://127.0.0.1:5488/v1"}"#),
//!     ("CONNECTOR", "postgres"),
//! ])?;
//!
//! if let Some(neon) = env.narrow::<tags::NeonWs>() {
//!     assert_eq!(neon.adapter_config().proxy_url(), "http://127.0.0.1:5488/v1");
//! }
//! # Ok::<(), testkit::EnvError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Environment types, validation and sources.
pub mod env {
    pub use testkit_env::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::env::{
        Connector, DriverAdapter, DriverAdapterConfig, Env, EnvForAdapter, ExecutorEnv,
        ExternalTestExecutor, RawEnv, tags,
    };
}

// Re-export key types at the crate root
pub use env::{Env, EnvError, EnvResult};
