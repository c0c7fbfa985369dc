//! Manaweave Storage Layer
//!
//! Implements the [`SynergyStore`](manaweave_domain::traits::SynergyStore)
//! and [`CardCatalog`](manaweave_domain::traits::CardCatalog) traits on
//! SQLite.
//!
//! # Architecture
//!
//! - `cards`: the collection, with each card's metadata and cached
//!   feature set stored as JSON
//! - `synergy_edges`: one row per unordered pair, lower id first, with
//!   the total and all eight component scores as indexed columns
//!
//! # Examples
//!
//! ```
//! use manaweave_domain::traits::SynergyStore;
//! use manaweave_domain::{CardId, SynergyScore};
//! use manaweave_store::SqliteStore;
//!
//! let mut store = SqliteStore::new(":memory:").unwrap();
//! let score = SynergyScore { total: 12.0, ..Default::default() };
//!
//! store.put(CardId::from_value(7), CardId::from_value(3), &score).unwrap();
//! let stored = store.get(CardId::from_value(3), CardId::from_value(7)).unwrap();
//! assert_eq!(stored, Some(score));
//! ```

#![warn(missing_docs)]

mod catalog;
mod edges;

use manaweave_domain::CardId;
use rusqlite::Connection;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON column could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A card cannot have synergy with itself
    #[error("Cannot store a synergy between card {0} and itself")]
    SelfPair(CardId),

    /// Card not found
    #[error("Card not found: {0}")]
    CardNotFound(CardId),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of SynergyStore and CardCatalog
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance; batch computation funnels all writes through one.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use manaweave_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("manaweave.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }
}

/// Current Unix time in seconds
pub(crate) fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// SQLite takes limits as i64
pub(crate) fn limit_param(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// Wrap a decoding failure so it can be raised inside a row mapper
pub(crate) fn conversion_error<E>(column: usize, error: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(error))
}
