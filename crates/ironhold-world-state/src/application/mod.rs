//! Resolvers for the World State context.

pub mod travel_resolver;
