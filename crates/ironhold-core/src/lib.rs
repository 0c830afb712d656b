//! Ironhold Core — shared domain abstractions.
//!
//! This crate defines the world state, the field-level updates resolvers
//! return, and the traits for every collaborator the turn pipeline talks
//! to (clock, randomness, narrative generation, lore retrieval, saves).
//! It contains no infrastructure code.

pub mod catalog;
pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod lore;
pub mod narrative;
pub mod repository;
pub mod rng;
pub mod state;
pub mod update;
