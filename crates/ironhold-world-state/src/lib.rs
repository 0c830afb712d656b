//! Ironhold — World State bounded context.
//!
//! Responsible for movement across the location graph and for the
//! end-of-turn validation that keeps world state within its invariants.

pub mod application;
pub mod domain;
