//! Error types for the data access layer.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Result alias for data layer operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors raised by the data access layer.
#[derive(Debug)]
pub enum DataError {
    /// Opening the connection pool failed.
    ConnectFailed {
        /// Underlying SQL error.
        source: sqlx::Error,
    },
    /// Migration execution failed.
    MigrationFailed {
        /// Underlying migration error.
        source: sqlx::migrate::MigrateError,
    },
    /// A database operation failed.
    QueryFailed {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying SQL error.
        source: sqlx::Error,
    },
}

impl DataError {
    pub(crate) const fn query(operation: &'static str, source: sqlx::Error) -> Self {
        Self::QueryFailed { operation, source }
    }

    /// Whether the failure is a unique constraint violation.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::QueryFailed {
                source: sqlx::Error::Database(db),
                ..
            } => db.is_unique_violation(),
            _ => false,
        }
    }
}

impl Display for DataError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectFailed { .. } => formatter.write_str("database connection failed"),
            Self::MigrationFailed { .. } => formatter.write_str("migration failed"),
            Self::QueryFailed { .. } => formatter.write_str("database operation failed"),
        }
    }
}

impl Error for DataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ConnectFailed { source } | Self::QueryFailed { source, .. } => Some(source),
            Self::MigrationFailed { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_error_display_and_source() {
        let connect = DataError::ConnectFailed {
            source: sqlx::Error::PoolTimedOut,
        };
        assert_eq!(connect.to_string(), "database connection failed");
        assert!(connect.source().is_some());

        let migration = DataError::MigrationFailed {
            source: sqlx::migrate::MigrateError::VersionMissing(1),
        };
        assert_eq!(migration.to_string(), "migration failed");
        assert!(migration.source().is_some());

        let query = DataError::query("paste.find_by_id", sqlx::Error::RowNotFound);
        assert_eq!(query.to_string(), "database operation failed");
        assert!(query.source().is_some());
        assert!(!query.is_unique_violation());
    }
}
