//! Driven port for the string key-value store that holds snapshots.
//!
//! The store mirrors browser-style local storage: flat string keys, string
//! values, no transactions. Adapters decide where the bytes live.

use thiserror::Error;

/// Errors raised by key-value store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyValueStoreError {
    /// The key was rejected by the adapter, e.g. it cannot name a file.
    #[error("invalid storage key {key:?}: {message}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// Why the adapter refused it.
        message: String,
    },
    /// Reading an existing value failed.
    #[error("failed to read {key}: {message}")]
    Read {
        /// Key being read.
        key: String,
        /// Underlying failure.
        message: String,
    },
    /// Writing a value failed.
    #[error("failed to write {key}: {message}")]
    Write {
        /// Key being written.
        key: String,
        /// Underlying failure.
        message: String,
    },
}

impl KeyValueStoreError {
    /// Build a [`KeyValueStoreError::Read`].
    pub fn read(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Read {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Build a [`KeyValueStoreError::Write`].
    pub fn write(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Write {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// String key-value storage.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;
}
