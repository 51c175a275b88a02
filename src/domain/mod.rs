//! Domain layer - pure classification logic with no I/O.
//!
//! This layer contains the core concepts of install attribution:
//! - Referrer parameter parsing
//! - Attribution codes
//! - Ordered attribution rules
//!
//! Everything here is a pure function of its input and easily testable.

pub mod code;
pub mod params;
pub mod rule;
