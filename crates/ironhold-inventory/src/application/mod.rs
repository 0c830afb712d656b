//! Resolvers for the Inventory & Economy context.

pub mod inventory_resolver;
