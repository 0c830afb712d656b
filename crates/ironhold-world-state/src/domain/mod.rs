//! World-state invariants.

pub mod validation;
