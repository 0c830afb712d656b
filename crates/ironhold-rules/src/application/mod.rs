//! Resolvers for the Rules & Resolution context.

pub mod combat_resolver;
