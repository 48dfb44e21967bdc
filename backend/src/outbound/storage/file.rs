//! Store that keeps each key in its own file inside one directory.
//!
//! All access goes through a `cap-std` directory handle, so keys can never
//! escape the storage directory. Writes land in a hidden temporary file that
//! is renamed over the target, leaving either the old value or the new one.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use thiserror::Error;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Errors raised while opening the storage directory.
#[derive(Debug, Error)]
pub enum FileStoreError {
    /// The directory could not be created or opened.
    #[error("failed to open storage directory {path}: {source}")]
    Open {
        /// Directory that was requested.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Key-value store backed by `<key>.json` files.
#[derive(Debug)]
pub struct FileKeyValueStore {
    dir: Dir,
    root: Utf8PathBuf,
}

impl FileKeyValueStore {
    /// Open `path`, creating it and any missing parents first.
    ///
    /// # Errors
    ///
    /// Returns [`FileStoreError::Open`] when the directory cannot be created
    /// or opened.
    pub fn open(path: &Utf8Path) -> Result<Self, FileStoreError> {
        let open_error = |source| FileStoreError::Open {
            path: path.to_path_buf(),
            source,
        };
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(open_error)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(open_error)?;
        Ok(Self {
            dir,
            root: path.to_path_buf(),
        })
    }

    /// Directory this store writes into.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn file_name(key: &str) -> Result<String, KeyValueStoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(format!("{key}.json"))
        } else {
            Err(KeyValueStoreError::InvalidKey {
                key: key.to_owned(),
                message: "keys may only contain ASCII letters, digits, '-' and '_'".to_owned(),
            })
        }
    }

    fn write_atomic(&self, file_name: &str, contents: &str) -> io::Result<()> {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_name = format!(".{file_name}.tmp.{}.{counter}", std::process::id());

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let written = self.dir.open_with(&tmp_name, &options).and_then(|mut file| {
            file.write_all(contents.as_bytes())?;
            file.sync_all()
        });
        let renamed = written.and_then(|()| replace(&self.dir, &tmp_name, file_name));
        if renamed.is_err() && self.dir.remove_file(&tmp_name).is_err() {
            // The temp file may never have been created.
        }
        renamed
    }
}

#[cfg(windows)]
fn replace(dir: &Dir, from: &str, to: &str) -> io::Result<()> {
    match dir.remove_file(to) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(from, dir, to)
}

#[cfg(not(windows))]
fn replace(dir: &Dir, from: &str, to: &str) -> io::Result<()> {
    dir.rename(from, dir, to)
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let name = Self::file_name(key)?;
        match self.dir.read_to_string(&name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(KeyValueStoreError::read(key, err.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let name = Self::file_name(key)?;
        self.write_atomic(&name, value)
            .map_err(|err| KeyValueStoreError::write(key, err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn temp_store() -> (tempfile::TempDir, FileKeyValueStore) {
        let tmp = tempfile::tempdir().expect("temp dir");
        let path = Utf8Path::from_path(tmp.path())
            .expect("utf-8 temp path")
            .join("nested")
            .join("store");
        let store = FileKeyValueStore::open(&path).expect("store opens");
        (tmp, store)
    }

    #[rstest]
    fn open_creates_missing_directories() {
        let (_tmp, store) = temp_store();
        assert!(store.root().is_dir());
    }

    #[rstest]
    fn values_round_trip_and_overwrite() {
        let (_tmp, store) = temp_store();
        assert_eq!(store.get("elhaOrders").expect("read"), None);
        store.set("elhaOrders", "[]").expect("write");
        store.set("elhaOrders", r#"[{"id":1}]"#).expect("overwrite");
        assert_eq!(
            store.get("elhaOrders").expect("read").as_deref(),
            Some(r#"[{"id":1}]"#)
        );
        assert!(store.root().join("elhaOrders.json").is_file());
    }

    #[rstest]
    fn no_temp_files_are_left_behind() {
        let (_tmp, store) = temp_store();
        store.set("elhaAdminMenu", "[]").expect("write");
        let names: Vec<_> = std::fs::read_dir(store.root())
            .expect("list dir")
            .map(|entry| entry.expect("entry").file_name())
            .collect();
        assert_eq!(names, [std::ffi::OsString::from("elhaAdminMenu.json")]);
    }

    #[rstest]
    #[case("")]
    #[case("../escape")]
    #[case("a/b")]
    #[case("with space")]
    fn unsafe_keys_are_rejected(#[case] key: &str) {
        let (_tmp, store) = temp_store();
        assert!(matches!(
            store.set(key, "x"),
            Err(KeyValueStoreError::InvalidKey { .. })
        ));
        assert!(matches!(
            store.get(key),
            Err(KeyValueStoreError::InvalidKey { .. })
        ));
    }
}
