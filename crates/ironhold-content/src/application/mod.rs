//! Loading content from a data directory.

pub mod loader;
