//! Inventory rules independent of any particular turn.

pub mod items;
