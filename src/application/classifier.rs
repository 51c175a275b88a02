//! Referrer classification.
//!
//! [`ReferrerClassifier`] couples a rule table with logging and metrics. It
//! holds no per-call state, so one instance can be cloned and shared across
//! threads freely.

use crate::application::metrics::Metrics;
use crate::domain::{
    code::AttributionCode,
    params::ParameterSet,
    rule::{RuleMatch, RuleTable},
};

use std::collections::BTreeSet;
use std::sync::Arc;

/// Error returned when building a [`ReferrerClassifier`] fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// The rule table has no rules
    #[error("rule table must contain at least one rule")]
    EmptyRuleTable,
    /// Two rules share a name
    #[error("duplicate rule name: {0}")]
    DuplicateRuleName(String),
}

/// Builder for constructing a [`ReferrerClassifier`].
#[derive(Debug, Default)]
pub struct ReferrerClassifierBuilder {
    rules: Option<RuleTable>,
    metrics: Option<Metrics>,
}

impl ReferrerClassifierBuilder {
    /// Replace the built-in rule table.
    ///
    /// # Example
    /// ```
    /// use referrer_attribution::{Condition, Outcome, ReferrerClassifier, Rule, RuleTable};
    ///
    /// let classifier = ReferrerClassifier::builder()
    ///     .with_rules(RuleTable::new(vec![Rule::new(
    ///         "partner",
    ///         Condition::equals("utm_source", "partner"),
    ///         Outcome::Code("PRT001".into()),
    ///     )]))
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(classifier.classify_raw("utm_source=partner").unwrap(), "PRT001");
    /// assert_eq!(classifier.classify_raw("gclid=abc"), None);
    /// ```
    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Share an existing metrics handle.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the classifier.
    ///
    /// # Errors
    /// Returns `BuildError` if the rule table is empty or has duplicate names.
    pub fn build(self) -> Result<ReferrerClassifier, BuildError> {
        let rules = self.rules.unwrap_or_default();

        if rules.is_empty() {
            return Err(BuildError::EmptyRuleTable);
        }

        let mut names = BTreeSet::new();
        for rule in rules.rules() {
            if !names.insert(rule.name()) {
                return Err(BuildError::DuplicateRuleName(rule.name().to_string()));
            }
        }

        Ok(ReferrerClassifier {
            rules: Arc::new(rules),
            metrics: self.metrics.unwrap_or_default(),
        })
    }
}

/// Classifies install referrers into attribution codes.
///
/// # Example
/// ```
/// use referrer_attribution::ReferrerClassifier;
///
/// let classifier = ReferrerClassifier::new();
///
/// assert_eq!(classifier.classify_raw("utm_source=x&gclid=abc").unwrap(), "UAC001");
/// assert_eq!(classifier.classify_raw("utm_source=x"), None);
/// assert_eq!(classifier.metrics().referrers_classified(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ReferrerClassifier {
    rules: Arc<RuleTable>,
    metrics: Metrics,
}

impl ReferrerClassifier {
    /// Create a classifier using the built-in rule table.
    pub fn new() -> Self {
        Self {
            rules: Arc::new(RuleTable::standard()),
            metrics: Metrics::new(),
        }
    }

    /// Create a builder for custom configuration.
    pub fn builder() -> ReferrerClassifierBuilder {
        ReferrerClassifierBuilder::default()
    }

    /// Parse and classify a raw referrer string.
    pub fn classify_raw(&self, raw: &str) -> Option<AttributionCode> {
        self.classify(&ParameterSet::parse(raw))
    }

    /// Classify already parsed parameters.
    pub fn classify(&self, params: &ParameterSet) -> Option<AttributionCode> {
        self.evaluate(params).map(|m| m.code)
    }

    /// Classify parameters, also reporting which rule fired.
    pub fn evaluate<'a>(&'a self, params: &ParameterSet) -> Option<RuleMatch<'a>> {
        let result = self.rules.evaluate(params);

        match &result {
            Some(m) => {
                tracing::debug!(
                    rule = m.rule.name(),
                    code = %m.code,
                    "install referrer attributed"
                );
            }
            None => {
                tracing::debug!(
                    parameters = params.len(),
                    "no attribution rule matched install referrer"
                );
            }
        }

        self.metrics.record_classification(result.is_some());
        result
    }

    /// Rule table in evaluation order.
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Get a reference to the metrics.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

impl Default for ReferrerClassifier {
    fn default() -> Self {
        Self::new()
    }
}
