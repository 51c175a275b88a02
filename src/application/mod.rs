//! Application layer - orchestration of domain logic.
//!
//! This layer wires the domain rules into runtime components:
//! - Referrer classifier (configured rule table, logging, metrics)
//! - Attribution recorder (classify once, persist through a port)
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. Persistence of attribution codes lives
//! behind [`ports::CodeStore`].

pub mod classifier;
pub mod metrics;
pub mod ports;
pub mod recorder;
