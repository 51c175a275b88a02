//! Field visitor for capturing emitted tracing events.
//!
//! Splits an event into its formatted `message` and the remaining structured
//! fields, all rendered as strings. Used by the capture layer in [`super::mocks`]
//! to assert on what the classifier and recorder log.

use std::collections::BTreeMap;
use std::fmt;
use tracing::field::{Field, Visit};

/// A visitor that extracts the message and field values of an event.
#[derive(Debug, Default)]
pub(crate) struct FieldVisitor {
    message: String,
    fields: BTreeMap<String, String>,
}

impl FieldVisitor {
    /// Create a new field visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the visitor and return the message and collected fields.
    pub fn into_parts(self) -> (String, BTreeMap<String, String>) {
        (self.message, self.fields)
    }

    fn insert(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_string());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{:?}", value));
    }
}
