//! The owned data set every operation reads and mutates.

use super::{CatalogStore, OrderLedger};

/// Catalog plus ledger; the unit that is persisted as a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Dishes and promos.
    pub catalog: CatalogStore,
    /// Placed orders and the next-id counter.
    pub ledger: OrderLedger,
}
