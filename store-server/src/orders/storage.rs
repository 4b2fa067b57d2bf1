//! redb-based order repository
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `(user_id, order_id)` | `Order` JSON | Primary records |
//! | `ref_index` | `order_ref` | `(user_id, order_id)` | Public-reference index |
//!
//! One logical keyspace, two key shapes: listing a user's orders is a prefix
//! range scan over the primary table; resolving a public reference goes
//! through the multimap index to the same record. The index being a multimap
//! keeps reference collisions observable instead of silently overwriting —
//! more than one entry under a reference is a data-integrity fault that gets
//! logged loudly while the first resolvable record is still returned.
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate`: once `commit()` returns the
//! order is on disk in a consistent state, which is what makes persistence
//! authoritative ahead of the best-effort side effects.

use std::path::Path;
use std::sync::Arc;

use redb::{
    Database, MultimapTableDefinition, ReadableDatabase, ReadableMultimapTable, ReadableTable,
    TableDefinition,
};
use thiserror::Error;

use shared::models::{Order, OrderPatch};
use shared::util::now_millis;

/// Primary table: key = (user_id, order_id), value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("orders");

/// Reference index: key = order_ref, value = (user_id, order_id)
const REF_INDEX_TABLE: MultimapTableDefinition<&str, (&str, &str)> =
    MultimapTableDefinition::new("ref_index");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Order repository backed by redb
#[derive(Clone)]
pub struct OrderStore {
    db: Arc<Database>,
}

impl OrderStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        // Create tables up front so read transactions never miss them
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_multimap_table(REF_INDEX_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Persist a newly created order under both key shapes
    pub fn put(&self, order: &Order) -> StorageResult<()> {
        let value = serde_json::to_vec(order)?;

        let txn = self.db.begin_write()?;
        {
            let mut orders = txn.open_table(ORDERS_TABLE)?;
            orders.insert(
                (order.user_id.as_str(), order.id.as_str()),
                value.as_slice(),
            )?;

            let mut ref_index = txn.open_multimap_table(REF_INDEX_TABLE)?;
            ref_index.insert(
                order.order_ref.as_str(),
                (order.user_id.as_str(), order.id.as_str()),
            )?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Fetch one order, `None` when the pair does not resolve
    pub fn get(&self, user_id: &str, order_id: &str) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        match table.get((user_id, order_id))? {
            Some(value) => {
                let order: Order = serde_json::from_slice(value.value())?;
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    /// All orders for a user, newest `created_at` first
    ///
    /// Prefix range scan over the primary table: every key for the user sorts
    /// contiguously after `(user_id, "")`.
    pub fn query_by_user(&self, user_id: &str) -> StorageResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in table.range((user_id, "")..)? {
            let (key, value) = result?;
            let (uid, _order_id) = key.value();
            if uid != user_id {
                break;
            }
            let order: Order = serde_json::from_slice(value.value())?;
            orders.push(order);
        }

        orders.sort_by_key(|o| std::cmp::Reverse(o.created_at));
        Ok(orders)
    }

    /// Resolve a public reference to its order
    ///
    /// Expected to match 0 or 1 records. More than one means a reference
    /// collision: logged as a data-integrity fault, first resolvable record
    /// returned anyway rather than hard-failing the customer.
    pub fn query_by_ref(&self, order_ref: &str) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let ref_index = read_txn.open_multimap_table(REF_INDEX_TABLE)?;

        let mut keys: Vec<(String, String)> = Vec::new();
        for entry in ref_index.get(order_ref)? {
            let guard = entry?;
            let (user_id, order_id) = guard.value();
            keys.push((user_id.to_string(), order_id.to_string()));
        }

        if keys.len() > 1 {
            tracing::error!(
                order_ref = %order_ref,
                count = keys.len(),
                "Order reference collision: index resolves to multiple records"
            );
        }

        let orders = read_txn.open_table(ORDERS_TABLE)?;
        for (user_id, order_id) in &keys {
            match orders.get((user_id.as_str(), order_id.as_str()))? {
                Some(value) => {
                    let order: Order = serde_json::from_slice(value.value())?;
                    return Ok(Some(order));
                }
                None => {
                    tracing::error!(
                        order_ref = %order_ref,
                        order_id = %order_id,
                        "Dangling reference index entry"
                    );
                }
            }
        }

        Ok(None)
    }

    /// Merge-patch an order inside one write transaction
    ///
    /// Only fields present in the patch are written; everything else keeps its
    /// stored value. Returns the updated order, or `None` when the
    /// `(user_id, order_id)` pair does not resolve.
    pub fn update(
        &self,
        user_id: &str,
        order_id: &str,
        patch: &OrderPatch,
    ) -> StorageResult<Option<Order>> {
        let txn = self.db.begin_write()?;
        let updated = {
            let mut table = txn.open_table(ORDERS_TABLE)?;

            // Read and deserialize first so the access guard is released
            // before the insert below
            let existing: Option<Order> = match table.get((user_id, order_id))? {
                Some(value) => Some(serde_json::from_slice(value.value())?),
                None => None,
            };

            match existing {
                Some(mut order) => {
                    order.apply(patch, now_millis());
                    let value = serde_json::to_vec(&order)?;
                    table.insert((user_id, order_id), value.as_slice())?;
                    Some(order)
                }
                None => None,
            }
        };
        txn.commit()?;
        Ok(updated)
    }
}
