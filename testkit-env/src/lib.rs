//! # testkit-env
//!
//! Typed environment configuration for driver adapter test executors.
//!
//! This crate provides:
//! - Driver adapter, executor and connector types
//! - Parsing of the JSON-encoded `DRIVER_ADAPTER_CONFIG`
//! - A validator that reports every misconfiguration in one pass
//! - Compile-time narrowing of an environment to a single adapter
//!
//! ## Example
//!
//! ```rust
//! use testkit_env::{Connector, DriverAdapter, Env, ExecutorEnv, ExternalTestExecutor};
//!
//! let env = Env::from_vars([
//!     ("DRIVER_ADAPTER", "pg"),
//!     ("CONNECTOR", "postgres"),
//! ])?;
//!
//! assert_eq!(env.driver_adapter(), DriverAdapter::Pg);
//! assert_eq!(env.connector(), Connector::Postgres);
//! assert_eq!(env.executor(), &ExecutorEnv::External(ExternalTestExecutor::Napi));
//! # Ok::<(), testkit_env::EnvError>(())
//! ```

pub mod adapter;
pub mod connector;
pub mod env;
pub mod error;
pub mod executor;
pub mod keys;
pub mod narrow;
pub mod raw;
pub mod source;
pub mod validator;

pub use adapter::{AdapterEnv, DriverAdapter, DriverAdapterConfig};
pub use connector::Connector;
pub use env::Env;
pub use error::{EnvError, EnvResult};
pub use executor::{ExecutorEnv, ExternalTestExecutor, MobileAdapterConfig};
pub use narrow::{AdapterTag, EnvForAdapter, tags};
pub use raw::RawEnv;
pub use source::{EnvSource, MapEnvSource, StdEnvSource};
pub use validator::{Validator, validate_env};
