//! Compile-time narrowing of an [`Env`] to one driver adapter.
//!
//! ```rust
//! use testkit_env::{Env, tags};
//!
//! let env = Env::from_vars([
//!     ("DRIVER_ADAPTER", "planetscale"),
//!     ("DRIVER_ADAPTER_CONFIG", r#"{"proxy_url":"http://127.0.0.1:8085"}"#),
//!     ("CONNECTOR", "vitess"),
//! ])
//! .unwrap();
//!
//! // Proxied adapters expose their config without an Option.
//! let planetscale = env.narrow::<tags::PlanetScale>().unwrap();
//! assert_eq!(planetscale.adapter_config().proxy_url(), "http://127.0.0.1:8085");
//!
//! assert!(env.narrow::<tags::Pg>().is_none());
//! ```

use std::fmt::Debug;
use std::marker::PhantomData;
use std::ops::Deref;

use crate::adapter::{AdapterEnv, DriverAdapter, DriverAdapterConfig};
use crate::env::Env;

/// A driver adapter known at compile time.
pub trait AdapterTag {
    /// The runtime tag.
    const ADAPTER: DriverAdapter;

    /// What a narrowed environment carries for this adapter.
    type Config<'a>: Copy + Debug;

    /// Extract the adapter-specific part, if the tag matches.
    fn project(adapter: &AdapterEnv) -> Option<Self::Config<'_>>;
}

/// An [`Env`] whose driver adapter is known to be `T`.
#[derive(Debug, Clone, Copy)]
pub struct EnvForAdapter<'a, T: AdapterTag> {
    env: &'a Env,
    config: T::Config<'a>,
    _tag: PhantomData<T>,
}

impl<'a, T: AdapterTag> EnvForAdapter<'a, T> {
    /// The full environment.
    pub fn env(&self) -> &'a Env {
        self.env
    }

    /// The adapter tag, known statically.
    pub fn driver_adapter(&self) -> DriverAdapter {
        T::ADAPTER
    }
}

impl<'a, T> EnvForAdapter<'a, T>
where
    T: AdapterTag<Config<'a> = &'a DriverAdapterConfig>,
{
    /// The adapter config, always present for proxied adapters.
    pub fn adapter_config(&self) -> &'a DriverAdapterConfig {
        self.config
    }
}

impl<T: AdapterTag> Deref for EnvForAdapter<'_, T> {
    type Target = Env;

    fn deref(&self) -> &Env {
        self.env
    }
}

impl Env {
    /// Narrow to adapter `T`, or `None` if a different adapter is selected.
    pub fn narrow<T: AdapterTag>(&self) -> Option<EnvForAdapter<'_, T>> {
        T::project(self.adapter()).map(|config| EnvForAdapter {
            env: self,
            config,
            _tag: PhantomData,
        })
    }
}

/// Marker types for each driver adapter.
pub mod tags {
    use super::*;

    macro_rules! proxied_tags {
        ($($(#[$meta:meta])* $tag:ident),* $(,)?) => {
            $(
                $(#[$meta])*
                #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
                pub struct $tag;

                impl AdapterTag for $tag {
                    const ADAPTER: DriverAdapter = DriverAdapter::$tag;
                    type Config<'a> = &'a DriverAdapterConfig;

                    fn project(adapter: &AdapterEnv) -> Option<Self::Config<'_>> {
                        match adapter {
                            AdapterEnv::$tag { config } => Some(config),
                            _ => None,
                        }
                    }
                }
            )*
        };
    }

    macro_rules! direct_tags {
        ($($(#[$meta:meta])* $tag:ident),* $(,)?) => {
            $(
                $(#[$meta])*
                #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
                pub struct $tag;

                impl AdapterTag for $tag {
                    const ADAPTER: DriverAdapter = DriverAdapter::$tag;
                    type Config<'a> = ();

                    fn project(adapter: &AdapterEnv) -> Option<Self::Config<'_>> {
                        matches!(adapter, AdapterEnv::$tag).then_some(())
                    }
                }
            )*
        };
    }

    proxied_tags! {
        /// `planetscale`
        PlanetScale,
        /// `neon:ws`
        NeonWs,
    }

    direct_tags! {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::Connector;

    fn env(vars: &[(&str, &str)]) -> Env {
        Env::from_vars(vars.iter().copied()).unwrap()
    }

    #[test]
    fn test_narrow_proxied_adapter() {
        let env = env(&[
            ("DRIVER_ADAPTER", "neon:ws"),
            ("DRIVER_ADAPTER_CONFIG", r#"{"proxy_url":"http://x"}"#),
            ("CONNECTOR", "postgres"),
        ]);

        let neon = env.narrow::<tags::NeonWs>().unwrap();
        assert_eq!(neon.driver_adapter(), DriverAdapter::NeonWs);
        assert_eq!(neon.adapter_config().proxy_url(), "http://x");
        // Deref reaches the other axes
        assert_eq!(neon.connector(), Connector::Postgres);
    }

    #[test]
    fn test_narrow_direct_adapter() {
        let env = env(&[("DRIVER_ADAPTER", "better-sqlite3"), ("CONNECTOR", "sqlite")]);

        let sqlite = env.narrow::<tags::BetterSqlite3>().unwrap();
        assert_eq!(sqlite.env(), &env);
        assert_eq!(sqlite.driver_adapter(), DriverAdapter::BetterSqlite3);
        assert!(sqlite.env().adapter_config().is_none());
    }

    #[test]
    fn test_narrow_mismatch() {
        let env = env(&[("DRIVER_ADAPTER", "mssql"), ("CONNECTOR", "sqlserver")]);

        assert!(env.narrow::<tags::Mssql>().is_some());
        assert!(env.narrow::<tags::PlanetScale>().is_none());
        assert!(env.narrow::<tags::Mariadb>().is_none());
    }

    #[test]
    fn test_tag_constants_match_adapters() {
        assert_eq!(tags::PlanetScale::ADAPTER, DriverAdapter::PlanetScale);
        assert_eq!(tags::D1::ADAPTER, DriverAdapter::D1);
        assert_eq!(tags::Libsql::ADAPTER.as_str(), "libsql");
    }
}
