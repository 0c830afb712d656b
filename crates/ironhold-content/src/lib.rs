//! Ironhold — Content bounded context.
//!
//! Responsible for loading the static location and NPC tables and the
//! lore corpus, validating them once at the boundary, and serving lore
//! through a keyword-ranked `LoreRetriever`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
