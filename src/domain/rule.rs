//! Attribution rules and the ordered rule table.
//!
//! A rule pairs a [`Condition`] over a [`ParameterSet`] with an [`Outcome`].
//! Rules are evaluated top to bottom and the first match wins. Conditions are
//! plain data, so tables are `Clone + Debug`.

use crate::domain::code::AttributionCode;
use crate::domain::params::ParameterSet;
use std::borrow::Cow;

/// Parameter carrying a direct referral-program code.
pub const REFERRAL_CODE_PARAM: &str = "urpc";

/// Google click id parameter.
pub const GCLID_PARAM: &str = "gclid";

/// Google app-to-web click id parameter.
pub const GBRAID_PARAM: &str = "gbraid";

/// Campaign source parameter.
pub const UTM_SOURCE_PARAM: &str = "utm_source";

/// Campaign name parameter.
pub const UTM_CAMPAIGN_PARAM: &str = "utm_campaign";

/// `utm_source` sent by the EEA browser choice screen.
pub const BROWSER_CHOICE_SOURCE: &str = "eea-browser-choice";

/// `utm_source` sent by the EEA search choice screen.
pub const SEARCH_CHOICE_SOURCE: &str = "eea-search-choice";

/// Predicate over a parameter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Parameter is present with exactly this value
    Equals {
        key: Cow<'static, str>,
        value: Cow<'static, str>,
    },
    /// Parameter is present, whatever its value
    Present(Cow<'static, str>),
    /// Parameter is absent
    Absent(Cow<'static, str>),
    /// Parameter is present and its value contains `needle`
    Contains {
        key: Cow<'static, str>,
        needle: Cow<'static, str>,
    },
    /// Every nested condition holds (an empty list always holds)
    All(Vec<Condition>),
}

impl Condition {
    /// Parameter equals a static value.
    pub fn equals(key: &'static str, value: &'static str) -> Self {
        Condition::Equals {
            key: Cow::Borrowed(key),
            value: Cow::Borrowed(value),
        }
    }

    /// Parameter is present.
    pub fn present(key: &'static str) -> Self {
        Condition::Present(Cow::Borrowed(key))
    }

    /// Parameter is absent.
    pub fn absent(key: &'static str) -> Self {
        Condition::Absent(Cow::Borrowed(key))
    }

    /// Parameter value contains a static substring.
    pub fn contains(key: &'static str, needle: &'static str) -> Self {
        Condition::Contains {
            key: Cow::Borrowed(key),
            needle: Cow::Borrowed(needle),
        }
    }

    /// Check the condition against a parameter set.
    pub fn matches(&self, params: &ParameterSet) -> bool {
        match self {
            Condition::Equals { key, value } => params.get(key) == Some(&**value),
            Condition::Present(key) => params.contains(key),
            Condition::Absent(key) => !params.contains(key),
            Condition::Contains { key, needle } => params
                .get(key)
                .is_some_and(|value| value.contains(&**needle)),
            Condition::All(conditions) => conditions.iter().all(|c| c.matches(params)),
        }
    }
}

/// What a matching rule produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A fixed code
    Code(AttributionCode),
    /// The verbatim value of the named parameter
    Passthrough(Cow<'static, str>),
}

impl Outcome {
    /// Resolve the outcome to a code.
    ///
    /// Returns `None` only for a passthrough whose parameter is missing.
    pub fn resolve(&self, params: &ParameterSet) -> Option<AttributionCode> {
        match self {
            Outcome::Code(code) => Some(code.clone()),
            Outcome::Passthrough(key) => params.get(key).map(AttributionCode::from),
        }
    }
}

/// A named condition/outcome pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: Cow<'static, str>,
    condition: Condition,
    outcome: Outcome,
}

impl Rule {
    /// Create a rule.
    pub fn new(name: impl Into<Cow<'static, str>>, condition: Condition, outcome: Outcome) -> Self {
        Self {
            name: name.into(),
            condition,
            outcome,
        }
    }

    /// Rule name, used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rule's condition.
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// The rule's outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Apply the rule, returning a code if it matches.
    ///
    /// A passthrough whose parameter is missing does not match.
    pub fn apply(&self, params: &ParameterSet) -> Option<AttributionCode> {
        if self.condition.matches(params) {
            self.outcome.resolve(params)
        } else {
            None
        }
    }
}

/// The rule that fired and the code it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    /// Matching rule
    pub rule: &'a Rule,
    /// Resulting code
    pub code: AttributionCode,
}

/// Ordered list of rules; the first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Create a table from rules in evaluation order.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The built-in install attribution table.
    ///
    /// Choice-screen flows come first, then direct referral codes, then
    /// click-id inference. Only borrowed strings are used.
    pub fn standard() -> Self {
        Self::new(vec![
            Rule::new(
                "browser-choice-screen",
                Condition::equals(UTM_SOURCE_PARAM, BROWSER_CHOICE_SOURCE),
                Outcome::Code(AttributionCode::BROWSER_CHOICE_SCREEN),
            ),
            Rule::new(
                "search-choice-screen",
                Condition::All(vec![
                    Condition::equals(UTM_SOURCE_PARAM, SEARCH_CHOICE_SOURCE),
                    Condition::present(GCLID_PARAM),
                ]),
                Outcome::Code(AttributionCode::SEARCH_CHOICE_SCREEN),
            ),
            Rule::new(
                "referral-program",
                Condition::present(REFERRAL_CODE_PARAM),
                Outcome::Passthrough(Cow::Borrowed(REFERRAL_CODE_PARAM)),
            ),
            Rule::new(
                "dual-click",
                Condition::All(vec![
                    Condition::present(GCLID_PARAM),
                    Condition::present(GBRAID_PARAM),
                ]),
                Outcome::Code(AttributionCode::DUAL_CLICK),
            ),
            Rule::new(
                "gbraid-click",
                Condition::All(vec![
                    Condition::present(GBRAID_PARAM),
                    Condition::absent(GCLID_PARAM),
                ]),
                Outcome::Code(AttributionCode::GBRAID_CLICK),
            ),
            Rule::new(
                "gclid-click",
                Condition::All(vec![
                    Condition::present(GCLID_PARAM),
                    Condition::absent(GBRAID_PARAM),
                ]),
                Outcome::Code(AttributionCode::GCLID_CLICK),
            ),
            Rule::new(
                "embedded-campaign-click",
                Condition::contains(UTM_CAMPAIGN_PARAM, "gclid="),
                Outcome::Code(AttributionCode::EMBEDDED_CAMPAIGN_CLICK),
            ),
        ])
    }

    /// Evaluate the table, returning the first matching rule and its code.
    pub fn evaluate(&self, params: &ParameterSet) -> Option<RuleMatch<'_>> {
        self.rules.iter().find_map(|rule| {
            rule.apply(params).map(|code| RuleMatch { rule, code })
        })
    }

    /// Evaluate the table, returning only the code.
    pub fn classify(&self, params: &ParameterSet) -> Option<AttributionCode> {
        self.evaluate(params).map(|m| m.code)
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}
