//! Attribution codes emitted by classification.
//!
//! A code is an opaque token recorded for later reporting. Built-in rules emit
//! one of the fixed codes below; the referral-program rule passes the `urpc`
//! parameter value through unchanged.

use std::borrow::Cow;
use std::fmt;

/// An attribution code identifying the acquisition channel of an install.
///
/// Built-in codes borrow static strings, so the fixed rule table allocates
/// nothing for its outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributionCode(Cow<'static, str>);

impl AttributionCode {
    /// Install from the EEA browser choice screen.
    pub const BROWSER_CHOICE_SCREEN: AttributionCode =
        AttributionCode(Cow::Borrowed("BCS001"));

    /// Install from the EEA search choice screen with a Google click id.
    pub const SEARCH_CHOICE_SCREEN: AttributionCode = AttributionCode(Cow::Borrowed("SCS001"));

    /// Paid click carrying only a `gclid`.
    pub const GCLID_CLICK: AttributionCode = AttributionCode(Cow::Borrowed("UAC001"));

    /// Click id embedded inside the `utm_campaign` value.
    pub const EMBEDDED_CAMPAIGN_CLICK: AttributionCode = AttributionCode(Cow::Borrowed("UAC002"));

    /// Paid click carrying only a `gbraid`.
    pub const GBRAID_CLICK: AttributionCode = AttributionCode(Cow::Borrowed("UAC003"));

    /// Paid click carrying both `gclid` and `gbraid`.
    pub const DUAL_CLICK: AttributionCode = AttributionCode(Cow::Borrowed("UAC004"));

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the code and return the owned token.
    pub fn into_string(self) -> String {
        self.0.into_owned()
    }
}

impl fmt::Display for AttributionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AttributionCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for AttributionCode {
    fn from(code: String) -> Self {
        AttributionCode(Cow::Owned(code))
    }
}

impl From<&str> for AttributionCode {
    fn from(code: &str) -> Self {
        AttributionCode(Cow::Owned(code.to_string()))
    }
}

impl PartialEq<str> for AttributionCode {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for AttributionCode {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
