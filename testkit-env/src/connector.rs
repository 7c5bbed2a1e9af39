//! Target database connectors.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::EnvError;

/// Database engine under test, the value of `CONNECTOR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connector {
    /// PostgreSQL.
    Postgres,
    /// CockroachDB.
    CockroachDb,
    /// SQLite.
    Sqlite,
    /// MySQL / MariaDB.
    MySql,
    /// Microsoft SQL Server.
    SqlServer,
    /// Vitess (PlanetScale).
    Vitess,
}

impl Connector {
    /// Every connector, in declaration order.
    pub const ALL: [Connector; 6] = [
        Self::Postgres,
        Self::CockroachDb,
        Self::Sqlite,
        Self::MySql,
        Self::SqlServer,
        Self::Vitess,
    ];

    /// Get the connector name as used in `CONNECTOR`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::CockroachDb => "cockroachdb",
            Self::Sqlite => "sqlite",
            Self::MySql => "mysql",
            Self::SqlServer => "sqlserver",
            Self::Vitess => "vitess",
        }
    }
}

impl FromStr for Connector {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|connector| connector.as_str() == s)
            .ok_or_else(|| EnvError::unknown_connector(Some(s)))
    }
}

impl std::fmt::Display for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connector_names_round_trip() {
        for connector in Connector::ALL {
            assert_eq!(connector.as_str().parse::<Connector>().unwrap(), connector);
        }
    }

    #[test]
    fn test_connector_serde_matches_as_str() {
        for connector in Connector::ALL {
            let json = serde_json::to_string(&connector).unwrap();
            assert_eq!(json, format!("\"{}\"", connector.as_str()));
        }
    }

    #[test]
    fn test_connector_rejects_aliases() {
        assert!("postgresql".parse::<Connector>().is_err());
        assert!("mssql".parse::<Connector>().is_err());
        assert!("SQLite".parse::<Connector>().is_err());
    }
}
