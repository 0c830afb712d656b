//! Pure content parsing and validation.

pub mod lore;
pub mod tables;
pub mod validation;
