//! Ironhold — Narrative Orchestration bounded context.
//!
//! Responsible for NPC conversations, free-form story narration, and the
//! prompts and transport used to reach the narrative service.

pub mod application;
pub mod domain;
pub mod infrastructure;
