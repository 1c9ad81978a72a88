use crate::dom;
use dreamtrip_core::{PreferenceError, PreferenceStore};
use web_sys::Storage;

/// Preferences kept in `localStorage`. When storage is blocked every read
/// misses and every write reports [`PreferenceError::Unavailable`].
#[derive(Debug, Clone, Default)]
pub struct LocalPreferenceStore {
    storage: Option<Storage>,
}

impl LocalPreferenceStore {
    #[must_use]
    pub fn open() -> Self {
        match dom::local_storage() {
            Ok(storage) => Self {
                storage: Some(storage),
            },
            Err(err) => {
                log::warn!("preferences will not persist: {err}");
                Self::default()
            }
        }
    }
}

impl PreferenceStore for LocalPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let storage = self.storage.as_ref().ok_or(PreferenceError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|err| PreferenceError::Write {
                key: key.to_string(),
                reason: dom::js_error_message(&err),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_storage_reads_nothing_and_refuses_writes() {
        let mut store = LocalPreferenceStore::default();
        assert_eq!(store.get("dreamTripTheme"), None);
        assert_eq!(
            store.set("dreamTripTheme", "dark"),
            Err(PreferenceError::Unavailable)
        );
    }
}
