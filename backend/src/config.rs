//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from `EATERY_*` environment variables or a configuration file;
//! anything unset falls back to the defaults below.

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{DEFAULT_KEY_PREFIX, StorageKeys, TransitionPolicy};

const DEFAULT_STORAGE_DIR: &str = "./.eatery";
const DEFAULT_ADMIN_EMAIL: &str = "admin@elha.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Settings for the storage adapter, the admin account, and order rules.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EATERY")]
pub struct EaterySettings {
    /// Directory holding one file per storage key.
    pub storage_dir: Option<Utf8PathBuf>,
    /// Prefix prepended to every storage key.
    pub key_prefix: Option<String>,
    /// Email that logs in as the administrator.
    pub admin_email: Option<String>,
    /// Password that logs in as the administrator.
    pub admin_password: Option<String>,
    /// Refuse status changes on completed or cancelled orders.
    #[ortho_config(default = false)]
    pub lock_final_statuses: bool,
}

impl EaterySettings {
    /// Storage directory, falling back to `./.eatery`.
    #[must_use]
    pub fn storage_dir(&self) -> &Utf8Path {
        self.storage_dir
            .as_deref()
            .unwrap_or_else(|| Utf8Path::new(DEFAULT_STORAGE_DIR))
    }

    /// Key prefix, falling back to `elha`.
    #[must_use]
    pub fn key_prefix(&self) -> &str {
        self.key_prefix.as_deref().unwrap_or(DEFAULT_KEY_PREFIX)
    }

    /// Storage keys derived from the prefix.
    #[must_use]
    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::with_prefix(self.key_prefix())
    }

    /// Admin email, falling back to `admin@elha.com`.
    #[must_use]
    pub fn admin_email(&self) -> &str {
        self.admin_email.as_deref().unwrap_or(DEFAULT_ADMIN_EMAIL)
    }

    /// Admin password, falling back to `admin123`.
    #[must_use]
    pub fn admin_password(&self) -> &str {
        self.admin_password
            .as_deref()
            .unwrap_or(DEFAULT_ADMIN_PASSWORD)
    }

    /// Status change rule selected by `lock_final_statuses`.
    #[must_use]
    pub const fn transition_policy(&self) -> TransitionPolicy {
        if self.lock_final_statuses {
            TransitionPolicy::LockFinal
        } else {
            TransitionPolicy::Permissive
        }
    }
}

impl std::fmt::Debug for EaterySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EaterySettings")
            .field("storage_dir", &self.storage_dir)
            .field("key_prefix", &self.key_prefix)
            .field("admin_email", &self.admin_email)
            .field("lock_final_statuses", &self.lock_final_statuses)
            .finish_non_exhaustive()
    }
}
