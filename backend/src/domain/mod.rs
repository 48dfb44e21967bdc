//! Domain primitives, aggregates, and services.
//!
//! Purpose: model the menu, the session cart, and the order ledger without
//! knowing where snapshots are stored or how commands arrive. Adapters talk to
//! this layer through [`ports`] and [`EateryService`].
//!
//! Public surface:
//! - EateryError / ErrorCode: transport-agnostic failure payload.
//! - Dish, Promo, CatalogStore: the menu and its positional admin API.
//! - Cart, Session, SessionUser: per-session state, never persisted.
//! - Order, OrderLedger, TransitionPolicy: placed orders and status rules.
//! - SnapshotRepository: persisted image of catalog, ledger, and counter.
//! - EateryService: the use-cases, one method each.

pub mod ports;

mod cart;
mod catalog;
mod dish;
mod eatery_service;
mod error;
mod ledger;
mod order;
mod persistence;
mod promo;
mod receipt;
mod session;
mod state;

pub use self::cart::Cart;
pub use self::catalog::{
    CatalogList, CatalogStore, IndexOutOfRange, MenuEntry, MenuFilter, MenuSection,
};
pub use self::dish::{
    Dish, DishDraft, DishId, DishTag, DishValidationError, ParseDishTagError,
};
pub use self::eatery_service::EateryService;
pub use self::error::{EateryError, ErrorCode, ErrorValidationError};
pub use self::ledger::OrderLedger;
pub use self::order::{Order, OrderId, OrderStatus, ParseOrderStatusError, TransitionPolicy};
pub use self::persistence::{DEFAULT_KEY_PREFIX, SnapshotRepository, StorageKeys};
pub use self::promo::{Promo, PromoDraft, PromoId, PromoValidationError};
pub use self::receipt::{Receipt, ReceiptLine};
pub use self::session::{
    ADMIN_NAME, DEFAULT_CUSTOMER_NAME, LoginCredentials, Session, SessionUser,
    SessionValidationError,
};
pub use self::state::AppState;

