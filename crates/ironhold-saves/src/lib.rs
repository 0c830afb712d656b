//! Ironhold — save storage.
//!
//! Games are stored as one pretty-printed JSON document per file in a
//! single directory.

pub mod json_save_repository;
