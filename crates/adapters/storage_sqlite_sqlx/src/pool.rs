//! Opening the `SQLite` database that holds the item table.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use crate::error::StorageError;

/// Where the item table lives.
pub struct Config {
    /// A `sqlite:` URL such as `sqlite:devicekv.db?mode=rwc`, or
    /// `sqlite::memory:` for a throwaway database.
    pub database_url: String,
}

impl Config {
    /// Open the database, creating the file on first use, and bring the item
    /// table schema up to date.
    ///
    /// # Errors
    ///
    /// [`StorageError::Database`] when the URL is malformed or the database
    /// cannot be opened, [`StorageError::Migration`] when the schema cannot
    /// be applied.
    pub async fn build(self) -> Result<Database, StorageError> {
        let database = Database::open(&self.database_url).await?;
        database.migrate().await?;
        Ok(database)
    }
}

/// An open, migrated database.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    async fn open(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;
        Ok(Self { pool })
    }

    async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::debug!("item table schema is current");
        Ok(())
    }

    /// Pool to hand to [`SqliteKeyValueStore::new`](crate::SqliteKeyValueStore::new).
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
