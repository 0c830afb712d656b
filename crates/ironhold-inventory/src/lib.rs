//! Ironhold — Inventory & Economy bounded context.
//!
//! Responsible for item handling, gold transfers, and resting at the tavern.

pub mod application;
pub mod domain;
