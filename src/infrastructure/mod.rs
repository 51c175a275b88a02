//! Infrastructure layer - external adapters and integrations.
//!
//! This layer provides adapters for:
//! - Code storage (in-memory store)
//! - Test doubles for stores and tracing output

pub mod store;

#[cfg(any(test, feature = "test-helpers"))]
pub(crate) mod visitor;

/// Mock implementations for testing.
///
/// This module is only available when the `test-helpers` feature is enabled,
/// or during test builds. It provides controllable test doubles for stores
/// and a tracing layer that captures emitted events.
///
/// To use these mocks in integration tests, add to your `Cargo.toml`:
/// ```toml
/// [dev-dependencies]
/// referrer-attribution = { version = "*", features = ["test-helpers"] }
/// ```
#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;
