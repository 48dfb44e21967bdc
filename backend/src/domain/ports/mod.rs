//! Domain ports for the hexagonal boundary.

mod key_value_store;
mod login_service;

#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
pub use key_value_store::{KeyValueStore, KeyValueStoreError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{ConfiguredLoginService, LoginService};
