//! Ironhold — HTTP surface.
//!
//! Holds live games in memory and exposes the turn pipeline, quest log,
//! and save storage over JSON.

pub mod error;
pub mod routes;
pub mod state;
