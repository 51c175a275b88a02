//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the application
//! layer needs. Infrastructure adapters implement these ports.

use crate::domain::code::AttributionCode;
use std::fmt::Debug;

/// Error returned by a [`CodeStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached
    #[error("attribution store unavailable: {0}")]
    Unavailable(String),
    /// A writer panicked while holding the store lock
    #[error("attribution store lock poisoned")]
    Poisoned,
}

/// Port for persisting the install's attribution code.
///
/// The host decides where the code lives (preferences, a database, ...).
/// Infrastructure provides an in-memory implementation (InMemoryCodeStore).
pub trait CodeStore: Send + Sync + Debug {
    /// Load the stored code, if any.
    fn load(&self) -> Result<Option<AttributionCode>, StoreError>;

    /// Store a code, replacing any previous value.
    fn save(&self, code: &AttributionCode) -> Result<(), StoreError>;

    /// Store a code only if none is stored yet, as one atomic step.
    ///
    /// Returns the already stored code, or `None` if `code` was written.
    fn save_if_absent(&self, code: &AttributionCode)
        -> Result<Option<AttributionCode>, StoreError>;
}

impl<T: CodeStore + ?Sized> CodeStore for std::sync::Arc<T> {
    fn load(&self) -> Result<Option<AttributionCode>, StoreError> {
        (**self).load()
    }

    fn save(&self, code: &AttributionCode) -> Result<(), StoreError> {
        (**self).save(code)
    }

    fn save_if_absent(
        &self,
        code: &AttributionCode,
    ) -> Result<Option<AttributionCode>, StoreError> {
        (**self).save_if_absent(code)
    }
}
