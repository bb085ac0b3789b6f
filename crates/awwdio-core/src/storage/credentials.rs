use keyring::Entry;

use super::{DurableStore, Result, StorageError};

const SERVICE_NAME: &str = "awwdio";

/// Keeps entries in the OS keychain, one credential per key.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new(SERVICE_NAME)
    }
}

impl KeyringStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry> {
        Entry::new(&self.service, key).map_err(|source| StorageError::Keyring {
            key: key.to_string(),
            source,
        })
    }
}

impl DurableStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(source) => Err(StorageError::Keyring {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?
            .set_password(value)
            .map_err(|source| StorageError::Keyring {
                key: key.to_string(),
                source,
            })
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(source) => Err(StorageError::Keyring {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A service name no other test or real session uses
    fn scratch_store(test: &str) -> KeyringStore {
        KeyringStore::new(format!("awwdio-test-{}-{}", test, std::process::id()))
    }

    #[test]
    fn test_default_uses_app_service_name() {
        assert_eq!(KeyringStore::default().service, SERVICE_NAME);
    }

    #[test]
    #[ignore = "needs an OS keychain"]
    fn test_set_then_get_round_trips() {
        let store = scratch_store("round-trip");
        store.set("token", "abc").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("abc"));

        // A fresh handle on the same service sees the same entry
        let again = KeyringStore::new(store.service.clone());
        assert_eq!(again.get("token").unwrap().as_deref(), Some("abc"));

        store.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    #[ignore = "needs an OS keychain"]
    fn test_missing_entry_is_absent() {
        let store = scratch_store("missing");
        assert_eq!(store.get("user").unwrap(), None);
    }

    #[test]
    #[ignore = "needs an OS keychain"]
    fn test_remove_missing_entry_is_ok() {
        let store = scratch_store("remove-missing");
        store.remove("user").unwrap();
    }
}
