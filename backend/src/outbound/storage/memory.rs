//! Process-local store for tests and throwaway runs.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

/// Key-value store held in a mutex-guarded map.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl InMemoryKeyValueStore {
    /// Store pre-populated with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            ),
        }
    }

    fn lock(&self, key: &str) -> Result<MutexGuard<'_, BTreeMap<String, String>>, String> {
        self.entries
            .lock()
            .map_err(|_| format!("store lock poisoned while accessing {key}"))
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let entries = self
            .lock(key)
            .map_err(|message| KeyValueStoreError::read(key, message))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let mut entries = self
            .lock(key)
            .map_err(|message| KeyValueStoreError::write(key, message))?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
