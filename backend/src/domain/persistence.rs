//! Snapshot persistence over a [`KeyValueStore`].
//!
//! The whole data set is written on every save, one JSON document per key,
//! overwriting the previous snapshot. Loading is lenient: a missing or
//! unparsable key falls back to its empty default, a single unreadable record
//! is skipped without losing its neighbours, and each problem is logged.
//! Orders written with the retired `Delivered` label load as `Completed`;
//! other unknown status labels are kept as stored.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::ports::{KeyValueStore, KeyValueStoreError};
use super::{AppState, CatalogStore, EateryError, Order, OrderLedger, OrderStatus};

/// Key prefix used by existing snapshots.
pub const DEFAULT_KEY_PREFIX: &str = "elha";

impl From<KeyValueStoreError> for EateryError {
    fn from(value: KeyValueStoreError) -> Self {
        Self::storage(value.to_string())
    }
}

/// Store keys that make up one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Dish list.
    pub menu: String,
    /// Promo list.
    pub promos: String,
    /// Order list.
    pub orders: String,
    /// Next order id, as a decimal string.
    pub counter: String,
}

impl StorageKeys {
    /// Keys under `prefix`, e.g. `elhaAdminMenu`.
    ///
    /// ```
    /// use eatery::domain::StorageKeys;
    ///
    /// let keys = StorageKeys::with_prefix("elha");
    /// assert_eq!(keys.counter, "elhaOrderIdCounter");
    /// ```
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            menu: format!("{prefix}AdminMenu"),
            promos: format!("{prefix}AdminPromos"),
            orders: format!("{prefix}Orders"),
            counter: format!("{prefix}OrderIdCounter"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_KEY_PREFIX)
    }
}

/// Reads and writes [`AppState`] snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotRepository<S> {
    store: S,
    keys: StorageKeys,
}

impl<S: KeyValueStore> SnapshotRepository<S> {
    /// Wrap a store using the given keys.
    pub const fn new(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    /// The keys this repository reads and writes.
    #[must_use]
    pub const fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// The wrapped store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Write the full snapshot, replacing whatever was stored before.
    ///
    /// Keys are written counter first, then orders, then the catalog. A
    /// failure part way through can leave the counter ahead of the stored
    /// orders, which only skips ids, and never stores an order without the
    /// counter that covers it.
    ///
    /// # Errors
    ///
    /// Returns a storage [`EateryError`] when the store rejects a write.
    /// Keys written before the failure keep their new values.
    pub fn save(&self, state: &AppState) -> Result<(), EateryError> {
        let counter = state.ledger.next_id().to_string();
        let orders = encode(state.ledger.orders())?;
        let menu = encode(state.catalog.dishes())?;
        let promos = encode(state.catalog.promos())?;

        self.store.set(&self.keys.counter, &counter)?;
        self.store.set(&self.keys.orders, &orders)?;
        self.store.set(&self.keys.menu, &menu)?;
        self.store.set(&self.keys.promos, &promos)?;
        debug!(
            dishes = state.catalog.dishes().len(),
            promos = state.catalog.promos().len(),
            orders = state.ledger.orders().len(),
            next_id = state.ledger.next_id(),
            "snapshot saved"
        );
        Ok(())
    }

    /// Read the snapshot back, defaulting anything absent or unparsable.
    ///
    /// # Errors
    ///
    /// Returns a storage [`EateryError`] when the store cannot be read.
    pub fn load(&self) -> Result<AppState, EateryError> {
        let dishes = self.read_records(&self.keys.menu)?;
        let promos = self.read_records(&self.keys.promos)?;
        let orders = migrate_orders(self.read_records(&self.keys.orders)?);
        let counter = self.read_counter()?;

        Ok(AppState {
            catalog: CatalogStore::from_parts(dishes, promos),
            ledger: OrderLedger::from_parts(orders, counter),
        })
    }

    /// Decode a JSON array one element at a time so a bad record costs only
    /// itself.
    fn read_records<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, EateryError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(Vec::new());
        };
        let values: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(err) => {
                warn!(key, error = %err, "unparsable snapshot key; using empty default");
                return Ok(Vec::new());
            }
        };
        let mut records = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value(value) {
                Ok(record) => records.push(record),
                Err(err) => warn!(key, index, error = %err, "skipping unreadable snapshot record"),
            }
        }
        Ok(records)
    }

    fn read_counter(&self) -> Result<u64, EateryError> {
        let Some(raw) = self.store.get(&self.keys.counter)? else {
            return Ok(1);
        };
        match raw.trim().parse::<u64>() {
            Ok(value) => Ok(value.max(1)),
            Err(err) => {
                warn!(key = %self.keys.counter, error = %err, "unparsable order counter; restarting at 1");
                Ok(1)
            }
        }
    }
}

fn migrate_orders(orders: Vec<Order>) -> Vec<Order> {
    let mut migrated = 0_usize;
    let mut unknown = 0_usize;
    let orders: Vec<Order> = orders
        .into_iter()
        .map(|order| {
            let status = order.status();
            if status.is_legacy_delivered() {
                migrated = migrated.saturating_add(1);
                order.with_status(OrderStatus::Completed)
            } else {
                if matches!(status, OrderStatus::Other(_)) {
                    unknown = unknown.saturating_add(1);
                }
                order
            }
        })
        .collect();
    if migrated > 0 {
        info!(count = migrated, "rewrote legacy Delivered orders as Completed");
    }
    if unknown > 0 {
        warn!(count = unknown, "orders with unrecognised status kept as stored");
    }
    orders
}

fn encode<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, EateryError> {
    serde_json::to_string(value)
        .map_err(|err| EateryError::internal(format!("failed to encode snapshot: {err}")))
}
