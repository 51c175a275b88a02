//! # referrer-attribution
//!
//! Install referrer parsing and marketing attribution classification.
//!
//! App stores hand a freshly installed app a referrer string such as
//! `utm_source=google&gclid=abc123`. This crate parses that string and decides
//! which attribution code, if any, the install should carry.
//!
//! ## Quick Start
//!
//! ```rust
//! use referrer_attribution::classify_referrer;
//!
//! assert_eq!(classify_referrer("utm_source=google&gclid=abc").unwrap(), "UAC001");
//! assert_eq!(classify_referrer("utm_source=eea-browser-choice").unwrap(), "BCS001");
//! assert_eq!(classify_referrer("utm_source=newsletter"), None);
//! ```
//!
//! ## Parsing
//!
//! The referrer is split on `&`, each segment on its first `=`. Keys and
//! values are percent-decoded and the first occurrence of a key wins:
//!
//! ```rust
//! use referrer_attribution::parse;
//!
//! let params = parse("utm_campaign=gclid%3Dabc&utm_campaign=ignored&flag");
//! assert_eq!(params.get("utm_campaign"), Some("gclid=abc"));
//! assert_eq!(params.get("flag"), Some(""));
//! ```
//!
//! Parsing never fails. Empty segments are ignored, invalid escapes are kept
//! verbatim and escapes that are not UTF-8 are decoded lossily.
//!
//! ## Attribution Rules
//!
//! Rules are evaluated in order and the first match wins:
//!
//! | # | Condition | Code |
//! |---|-----------|------|
//! | 1 | `utm_source` is `eea-browser-choice` | `BCS001` |
//! | 2 | `utm_source` is `eea-search-choice` and `gclid` present | `SCS001` |
//! | 3 | `urpc` present | value of `urpc` |
//! | 4 | `gclid` and `gbraid` present | `UAC004` |
//! | 5 | `gbraid` present, `gclid` absent | `UAC003` |
//! | 6 | `gclid` present, `gbraid` absent | `UAC001` |
//! | 7 | `utm_campaign` contains `gclid=` | `UAC002` |
//!
//! No match means no attribution. That is an expected outcome, not an error.
//!
//! ## Classifier and Metrics
//!
//! [`ReferrerClassifier`] wraps a rule table with `tracing` output and
//! counters. Custom tables are plain data:
//!
//! ```rust
//! use referrer_attribution::{Condition, Outcome, ReferrerClassifier, Rule, RuleTable};
//!
//! let mut rules = RuleTable::standard().rules().to_vec();
//! rules.insert(0, Rule::new(
//!     "preload",
//!     Condition::equals("utm_source", "oem-preload"),
//!     Outcome::Code("OEM001".into()),
//! ));
//!
//! let classifier = ReferrerClassifier::builder()
//!     .with_rules(RuleTable::new(rules))
//!     .build()
//!     .expect("valid rule table");
//!
//! assert_eq!(classifier.classify_raw("utm_source=oem-preload").unwrap(), "OEM001");
//! assert_eq!(classifier.metrics().snapshot().attribution_rate(), 1.0);
//! ```
//!
//! ## Recording
//!
//! [`AttributionRecorder`] classifies the first referrer it sees and stores
//! the code through the [`CodeStore`] port. Later referrers leave the stored
//! code alone:
//!
//! ```rust
//! use referrer_attribution::{
//!     AttributionRecorder, InMemoryCodeStore, RecordOutcome, ReferrerClassifier,
//! };
//!
//! let recorder = AttributionRecorder::new(ReferrerClassifier::new(), InMemoryCodeStore::new());
//!
//! assert!(matches!(recorder.record("gbraid=xyz"), RecordOutcome::Recorded(_)));
//! assert!(matches!(recorder.record("gclid=abc"), RecordOutcome::AlreadyRecorded(_)));
//! ```

// Domain layer - pure business logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    code::AttributionCode,
    params::ParameterSet,
    rule::{Condition, Outcome, Rule, RuleMatch, RuleTable},
};

pub use application::{
    classifier::{BuildError, ReferrerClassifier, ReferrerClassifierBuilder},
    metrics::{Metrics, MetricsSnapshot},
    ports::{CodeStore, StoreError},
    recorder::{AttributionRecorder, RecordOutcome},
};

pub use infrastructure::store::InMemoryCodeStore;

/// Parse a raw referrer string into parameters.
pub fn parse(raw: &str) -> ParameterSet {
    ParameterSet::parse(raw)
}

/// Classify parameters with the built-in rule table.
///
/// Pure: no logging, no metrics, no shared state.
pub fn classify(params: &ParameterSet) -> Option<AttributionCode> {
    RuleTable::standard().classify(params)
}

/// Parse and classify a raw referrer string with the built-in rule table.
pub fn classify_referrer(raw: &str) -> Option<AttributionCode> {
    classify(&parse(raw))
}
