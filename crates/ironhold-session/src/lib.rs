//! Ironhold — Session & Progress bounded context.
//!
//! Responsible for creating new games, tracking quest progression, and
//! running the turn pipeline that routes an action, resolves it, merges
//! the result, and validates the state.

pub mod application;
pub mod domain;
