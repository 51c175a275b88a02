//! Referrer parameter parsing.
//!
//! An install referrer is a query-string-like blob such as
//! `utm_source=google&gclid=abc`. Parsing is a single left-to-right pass:
//! - segments are split on `&`, empty segments are ignored
//! - each segment splits on its first `=`, so values may contain `=`
//! - a segment without `=` becomes a key with an empty value
//! - keys and values are percent-decoded
//! - the first occurrence of a key wins
//!
//! Parsing never fails. Undecodable input degrades to its raw or lossy form.

use std::borrow::Cow;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Decoded referrer parameters keyed by case-sensitive name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    params: BTreeMap<String, String>,
}

impl ParameterSet {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw referrer string.
    ///
    /// # Example
    /// ```
    /// use referrer_attribution::ParameterSet;
    ///
    /// let params = ParameterSet::parse("utm_source=google&utm_campaign=gclid%3Dabc&utm_source=other");
    ///
    /// assert_eq!(params.get("utm_source"), Some("google"));
    /// assert_eq!(params.get("utm_campaign"), Some("gclid=abc"));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let mut params = Self::new();

        for segment in raw.split('&').filter(|s| !s.is_empty()) {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));

            let key = decode_component(key);
            if key.is_empty() {
                continue;
            }

            params.insert_if_absent(key.into_owned(), decode_component(value).into_owned());
        }

        params
    }

    /// Insert a parameter unless the key is already present.
    ///
    /// Returns `true` if the value was inserted.
    pub fn insert_if_absent(&mut self, key: String, value: String) -> bool {
        match self.params.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Get the decoded value of a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Check whether a parameter is present, whatever its value.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Number of distinct parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if no parameters were parsed.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterSet
where
    K: Into<String>,
    V: Into<String>,
{
    /// Collect pairs with the same first-wins rule as parsing.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert_if_absent(key.into(), value.into());
        }
        params
    }
}

/// Percent-decode a key or value.
///
/// `+` is kept as is. Invalid escapes such as `%zz` pass through untouched,
/// and escapes that decode to invalid UTF-8 are replaced with U+FFFD.
fn decode_component(raw: &str) -> Cow<'_, str> {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded,
        Err(_) => {
            let bytes = urlencoding::decode_binary(raw.as_bytes());
            Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}
