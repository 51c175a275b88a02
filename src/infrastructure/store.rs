//! In-memory attribution code storage.

use crate::application::ports::{CodeStore, StoreError};
use crate::domain::code::AttributionCode;
use std::sync::Mutex;

/// Mutex-guarded in-memory [`CodeStore`].
///
/// Suitable for tests and for hosts that persist the code themselves after
/// reading it back.
#[derive(Debug, Default)]
pub struct InMemoryCodeStore {
    code: Mutex<Option<AttributionCode>>,
}

impl InMemoryCodeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a code.
    pub fn with_code(code: AttributionCode) -> Self {
        Self {
            code: Mutex::new(Some(code)),
        }
    }

    /// Remove the stored code.
    pub fn clear(&self) -> Result<(), StoreError> {
        *self.code.lock().map_err(|_| StoreError::Poisoned)? = None;
        Ok(())
    }
}

impl CodeStore for InMemoryCodeStore {
    fn load(&self) -> Result<Option<AttributionCode>, StoreError> {
        Ok(self.code.lock().map_err(|_| StoreError::Poisoned)?.clone())
    }

    fn save(&self, code: &AttributionCode) -> Result<(), StoreError> {
        *self.code.lock().map_err(|_| StoreError::Poisoned)? = Some(code.clone());
        Ok(())
    }

    fn save_if_absent(
        &self,
        code: &AttributionCode,
    ) -> Result<Option<AttributionCode>, StoreError> {
        let mut stored = self.code.lock().map_err(|_| StoreError::Poisoned)?;
        match stored.as_ref() {
            Some(existing) => Ok(Some(existing.clone())),
            None => {
                *stored = Some(code.clone());
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_empty_store() {
        let store = InMemoryCodeStore::new();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_and_load() {
        let store = InMemoryCodeStore::new();
        store.save(&AttributionCode::DUAL_CLICK).unwrap();
        assert_eq!(store.load().unwrap(), Some(AttributionCode::DUAL_CLICK));

        store.save(&"URPC".into()).unwrap();
        assert_eq!(store.load().unwrap(), Some(AttributionCode::from("URPC")));
    }

    #[test]
    fn test_save_if_absent_keeps_first_code() {
        let store = InMemoryCodeStore::new();

        assert_eq!(store.save_if_absent(&AttributionCode::GCLID_CLICK), Ok(None));
        assert_eq!(
            store.save_if_absent(&AttributionCode::GBRAID_CLICK),
            Ok(Some(AttributionCode::GCLID_CLICK))
        );
        assert_eq!(store.load().unwrap(), Some(AttributionCode::GCLID_CLICK));
    }

    #[test]
    fn test_clear() {
        let store = InMemoryCodeStore::with_code(AttributionCode::GCLID_CLICK);
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let store = Arc::new(InMemoryCodeStore::new());
        let poisoner = Arc::clone(&store);

        let _ = std::thread::spawn(move || {
            let _guard = poisoner.code.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert_eq!(store.load(), Err(StoreError::Poisoned));
        assert_eq!(store.save(&AttributionCode::GCLID_CLICK), Err(StoreError::Poisoned));
        assert_eq!(
            store.save_if_absent(&AttributionCode::GCLID_CLICK),
            Err(StoreError::Poisoned)
        );
    }

    #[test]
    fn test_arc_store_delegates() {
        let store = Arc::new(InMemoryCodeStore::new());
        CodeStore::save(&store, &AttributionCode::GBRAID_CLICK).unwrap();
        assert_eq!(
            CodeStore::load(&store).unwrap(),
            Some(AttributionCode::GBRAID_CLICK)
        );
    }
}
