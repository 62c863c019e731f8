//! Repository layer: entity-scoped database operations.
//!
//! Functions take a borrowed `Connection` and return `Option` for lookups by
//! id; turning a missing row into a not-found outcome is the caller's call.

mod appointment;
mod doctor;
mod patient;

pub use appointment::*;
pub use doctor::*;
pub use patient::*;
