//! First-launch attribution recording.
//!
//! The referrer arrives once per install. The recorder classifies it and
//! writes the resulting code through a [`CodeStore`] with a single
//! check-and-save, so an existing code is never replaced, even by concurrent
//! callers. Store failures are reported in the outcome and logged; they
//! never panic.

use crate::application::classifier::ReferrerClassifier;
use crate::application::ports::{CodeStore, StoreError};
use crate::domain::code::AttributionCode;

/// Result of recording an install referrer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new code was classified and stored
    Recorded(AttributionCode),
    /// The store already held this code; nothing was written
    AlreadyRecorded(AttributionCode),
    /// No rule matched; nothing was stored
    Unattributed,
    /// Reading or writing the store failed
    StoreFailed(StoreError),
}

impl RecordOutcome {
    /// The code now associated with the install, if any.
    pub fn code(&self) -> Option<&AttributionCode> {
        match self {
            RecordOutcome::Recorded(code) | RecordOutcome::AlreadyRecorded(code) => Some(code),
            RecordOutcome::Unattributed | RecordOutcome::StoreFailed(_) => None,
        }
    }
}

/// Classifies an install referrer once and persists the result.
#[derive(Debug, Clone)]
pub struct AttributionRecorder<C>
where
    C: CodeStore,
{
    classifier: ReferrerClassifier,
    store: C,
}

impl<C> AttributionRecorder<C>
where
    C: CodeStore,
{
    /// Create a recorder.
    pub fn new(classifier: ReferrerClassifier, store: C) -> Self {
        Self { classifier, store }
    }

    /// Classify `raw` and store the code unless one is already stored.
    ///
    /// # Example
    /// ```
    /// use referrer_attribution::{
    ///     AttributionRecorder, InMemoryCodeStore, RecordOutcome, ReferrerClassifier,
    /// };
    ///
    /// let recorder = AttributionRecorder::new(ReferrerClassifier::new(), InMemoryCodeStore::new());
    ///
    /// assert_eq!(recorder.record("urpc=FRIEND1"), RecordOutcome::Recorded("FRIEND1".into()));
    /// assert_eq!(recorder.record("gclid=abc"), RecordOutcome::AlreadyRecorded("FRIEND1".into()));
    /// ```
    pub fn record(&self, raw: &str) -> RecordOutcome {
        match self.store.load() {
            Ok(Some(existing)) => {
                tracing::debug!(code = %existing, "attribution code already recorded");
                return RecordOutcome::AlreadyRecorded(existing);
            }
            Ok(None) => {}
            Err(e) => return self.store_failed(e),
        }

        let Some(code) = self.classifier.classify_raw(raw) else {
            return RecordOutcome::Unattributed;
        };

        // Another caller may have stored a code since the load above.
        match self.store.save_if_absent(&code) {
            Ok(None) => {}
            Ok(Some(existing)) => {
                tracing::debug!(code = %existing, "attribution code already recorded");
                return RecordOutcome::AlreadyRecorded(existing);
            }
            Err(e) => return self.store_failed(e),
        }

        self.classifier.metrics().record_code_recorded();
        tracing::info!(code = %code, "attribution code recorded");
        RecordOutcome::Recorded(code)
    }

    fn store_failed(&self, error: StoreError) -> RecordOutcome {
        self.classifier.metrics().record_store_failure();
        tracing::warn!(error = %error, "failed to access attribution store");
        RecordOutcome::StoreFailed(error)
    }

    /// The classifier used by this recorder.
    pub fn classifier(&self) -> &ReferrerClassifier {
        &self.classifier
    }

    /// The underlying store.
    pub fn store(&self) -> &C {
        &self.store
    }
}
