//! Postgres-backed paste repository.

use std::time::Duration;

use async_trait::async_trait;
use javap_core::{Paste, PasteStore, ProcessingInput, ProcessingOutput, StoreError};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use crate::error::{DataError, Result};

const INSERT_PASTE: &str = r"
    INSERT INTO paste (id, owner_token, code, compiler_name, compiler_log, javap, procyon)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
";

const SELECT_PASTE: &str = r"
    SELECT id, owner_token, code, compiler_name, compiler_log, javap, procyon
    FROM paste
    WHERE id = $1
";

const UPDATE_PASTE: &str = r"
    UPDATE paste
    SET code = $2,
        compiler_name = $3,
        compiler_log = $4,
        javap = $5,
        procyon = $6,
        updated_at = now()
    WHERE id = $1
";

/// Open a connection pool against `database_url`.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .map_err(|source| DataError::ConnectFailed { source })
}

/// Database-backed paste store.
#[derive(Clone)]
pub struct PgPasteStore {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct PasteRow {
    id: String,
    owner_token: String,
    code: String,
    compiler_name: String,
    compiler_log: String,
    javap: String,
    procyon: String,
}

impl From<PasteRow> for Paste {
    fn from(row: PasteRow) -> Self {
        Self {
            id: row.id,
            owner_token: row.owner_token,
            input: ProcessingInput {
                code: row.code,
                compiler_name: row.compiler_name,
            },
            output: ProcessingOutput {
                compiler_log: row.compiler_log,
                disassembly: row.javap,
                decompilation: row.procyon,
            },
        }
    }
}

impl PgPasteStore {
    /// Initialise the store, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if migrations fail or the database is unreachable.
    pub async fn new(pool: PgPool) -> Result<Self> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|source| DataError::MigrationFailed { source })?;
        Ok(Self { pool })
    }

    /// Insert a new paste row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including unique violations.
    pub async fn insert_paste(&self, paste: &Paste) -> Result<()> {
        sqlx::query(INSERT_PASTE)
            .bind(&paste.id)
            .bind(&paste.owner_token)
            .bind(&paste.input.code)
            .bind(&paste.input.compiler_name)
            .bind(&paste.output.compiler_log)
            .bind(&paste.output.disassembly)
            .bind(&paste.output.decompilation)
            .execute(&self.pool)
            .await
            .map_err(|source| DataError::query("paste.insert", source))?;
        Ok(())
    }

    /// Load a paste row by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn fetch_paste(&self, id: &str) -> Result<Option<Paste>> {
        let row = sqlx::query_as::<_, PasteRow>(SELECT_PASTE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|source| DataError::query("paste.find_by_id", source))?;
        Ok(row.map(Paste::from))
    }

    /// Replace input and output of an existing paste, returning whether a row changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn replace_paste(&self, paste: &Paste) -> Result<bool> {
        let result = sqlx::query(UPDATE_PASTE)
            .bind(&paste.id)
            .bind(&paste.input.code)
            .bind(&paste.input.compiler_name)
            .bind(&paste.output.compiler_log)
            .bind(&paste.output.disassembly)
            .bind(&paste.output.decompilation)
            .execute(&self.pool)
            .await
            .map_err(|source| DataError::query("paste.update", source))?;
        Ok(result.rows_affected() > 0)
    }
}

fn backend(operation: &'static str, err: DataError) -> StoreError {
    StoreError::Backend {
        operation,
        source: Box::new(err),
    }
}

#[async_trait]
impl PasteStore for PgPasteStore {
    async fn insert(&self, paste: &Paste) -> std::result::Result<(), StoreError> {
        match self.insert_paste(paste).await {
            Ok(()) => Ok(()),
            Err(err) if err.is_unique_violation() => {
                debug!(paste_id = %paste.id, "paste id already present");
                Err(StoreError::DuplicateId {
                    id: paste.id.clone(),
                })
            }
            Err(err) => Err(backend("paste.insert", err)),
        }
    }

    async fn find_by_id(&self, id: &str) -> std::result::Result<Option<Paste>, StoreError> {
        self.fetch_paste(id)
            .await
            .map_err(|err| backend("paste.find_by_id", err))
    }

    async fn update(&self, paste: &Paste) -> std::result::Result<(), StoreError> {
        let changed = self
            .replace_paste(paste)
            .await
            .map_err(|err| backend("paste.update", err))?;
        if changed {
            Ok(())
        } else {
            Err(StoreError::Missing {
                id: paste.id.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_maps_to_paste_fields() {
        let row = PasteRow {
            id: "abc".to_string(),
            owner_token: "owner".to_string(),
            code: "class A {}".to_string(),
            compiler_name: "JAVA".to_string(),
            compiler_log: "log".to_string(),
            javap: "disassembly".to_string(),
            procyon: "decompiled".to_string(),
        };
        let paste = Paste::from(row);
        assert_eq!(paste.id, "abc");
        assert_eq!(paste.owner_token, "owner");
        assert_eq!(paste.input, ProcessingInput::new("class A {}", "JAVA"));
        assert_eq!(
            paste.output,
            ProcessingOutput::new("log", "disassembly", "decompiled")
        );
    }
}
