//! Failing code store for testing error paths.

use crate::application::ports::{CodeStore, StoreError};
use crate::domain::code::AttributionCode;

/// A [`CodeStore`] that fails on load or on save.
#[derive(Debug, Clone)]
pub struct FailingCodeStore {
    load_error: Option<StoreError>,
    save_error: Option<StoreError>,
}

impl FailingCodeStore {
    /// Every load fails with [`StoreError::Unavailable`].
    pub fn failing_load(reason: &str) -> Self {
        Self {
            load_error: Some(StoreError::Unavailable(reason.to_string())),
            save_error: None,
        }
    }

    /// Loads report an empty store; every save fails with [`StoreError::Unavailable`].
    pub fn failing_save(reason: &str) -> Self {
        Self {
            load_error: None,
            save_error: Some(StoreError::Unavailable(reason.to_string())),
        }
    }

    /// Both loads and saves fail with the given error.
    pub fn always(error: StoreError) -> Self {
        Self {
            load_error: Some(error.clone()),
            save_error: Some(error),
        }
    }
}

impl CodeStore for FailingCodeStore {
    fn load(&self) -> Result<Option<AttributionCode>, StoreError> {
        match &self.load_error {
            Some(e) => Err(e.clone()),
            None => Ok(None),
        }
    }

    fn save(&self, _code: &AttributionCode) -> Result<(), StoreError> {
        match &self.save_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn save_if_absent(
        &self,
        _code: &AttributionCode,
    ) -> Result<Option<AttributionCode>, StoreError> {
        match &self.save_error {
            Some(e) => Err(e.clone()),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failing_save_loads_empty() {
        let store = FailingCodeStore::failing_save("x");
        assert_eq!(store.load(), Ok(None));
        assert!(store.save(&AttributionCode::GCLID_CLICK).is_err());
        assert!(store.save_if_absent(&AttributionCode::GCLID_CLICK).is_err());
    }

    #[test]
    fn test_always() {
        let store = FailingCodeStore::always(StoreError::Poisoned);
        assert_eq!(store.load(), Err(StoreError::Poisoned));
        assert_eq!(store.save(&AttributionCode::GCLID_CLICK), Err(StoreError::Poisoned));
    }
}
