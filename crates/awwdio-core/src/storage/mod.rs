//! Durable key-value storage backing the auth store.
//!
//! This module provides:
//! - `DurableStore`: the storage seam the auth store is written against
//! - `FileStore`: one file per key in the user's data directory
//! - `KeyringStore`: OS keychain entries via keyring
//! - `MemoryStore` / `NoopStore`: in-process and headless stand-ins

pub mod credentials;
pub mod file;
pub mod memory;

pub use credentials::KeyringStore;
pub use file::FileStore;
pub use memory::{MemoryStore, NoopStore};

use thiserror::Error;

/// Key holding the JSON-serialized current user
pub const USER_KEY: &str = "user";

/// Key holding the raw bearer token of the current user
pub const TOKEN_KEY: &str = "token";

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Keychain access failed for '{key}': {source}")]
    Keyring {
        key: String,
        #[source]
        source: keyring::Error,
    },

    #[error("Failed to encode stored record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Client-local persistent key-value store.
///
/// Removing a key that is not present succeeds.
pub trait DurableStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}
