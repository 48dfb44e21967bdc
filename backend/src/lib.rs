//! Elha's Eatery ordering library.
//!
//! The [`domain`] layer holds the menu, the session cart, and the order
//! ledger. [`inbound`] adapters drive it from the command line and
//! [`outbound`] adapters persist snapshots. [`config`] loads runtime settings.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
