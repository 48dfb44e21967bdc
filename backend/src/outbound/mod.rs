//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **storage**: key-value stores backing snapshot persistence, either
//!   in memory or as one file per key on disk.
//!
//! Adapters are thin translators between domain ports and the storage
//! medium. They contain no business logic.

pub mod storage;
