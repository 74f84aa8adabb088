mod mock;
mod traits;

use std::fmt;

use crate::error::{AppError, AppResult};

pub use mock::MockServer;
pub use traits::{CatalogKind, DatabaseServer, FetchResult};

/// SQL driver inferred from a connection string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Postgres,
    Mysql,
    Sqlite,
}

impl Driver {
    /// Postgres is assumed when nothing else matches.
    pub fn detect(connection: &str) -> Self {
        if connection.starts_with("postgres://") || connection.starts_with("postgresql://") {
            return Self::Postgres;
        }
        if connection.starts_with("mysql://") || connection.contains("@tcp(") {
            return Self::Mysql;
        }
        if connection.ends_with(".db")
            || connection.starts_with("file:")
            || connection.starts_with(":memory:")
        {
            return Self::Sqlite;
        }
        Self::Postgres
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Postgres => "pgx",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite3",
        }
    }

    pub(crate) fn engine(self) -> &'static str {
        match self {
            Self::Postgres => "heap",
            Self::Mysql => "InnoDB",
            Self::Sqlite => "sqlite",
        }
    }

    pub(crate) fn mock_version(self) -> &'static str {
        match self {
            Self::Postgres => "16.2 (mock)",
            Self::Mysql => "8.0.36 (mock)",
            Self::Sqlite => "3.45.1 (mock)",
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Opens the server backing a session.
///
/// Only the in-memory mock ships; a real connection is rejected.
pub fn connect(connection: Option<&str>, use_mock: bool) -> AppResult<Box<dyn DatabaseServer>> {
    let driver = connection.map_or(Driver::Postgres, Driver::detect);
    tracing::info!(driver = %driver, "database driver detected");

    if !use_mock {
        return Err(AppError::unsupported(format!(
            "no {driver} client is built in; rerun with --mock"
        )));
    }

    tracing::info!(driver = %driver, "using mock database server");
    let flavour = match driver {
        Driver::Postgres => Driver::Postgres,
        Driver::Mysql | Driver::Sqlite => Driver::Mysql,
    };
    Ok(Box::new(MockServer::new(flavour)))
}
