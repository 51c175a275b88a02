//! Mock implementations for testing.
//!
//! This module provides test doubles for infrastructure adapters,
//! enabling controlled testing of application logic.

pub mod layer;
pub mod store;

pub use layer::{CapturedEvent, MockCaptureLayer};
pub use store::FailingCodeStore;
