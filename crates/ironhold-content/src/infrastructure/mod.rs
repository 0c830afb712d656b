//! Lore retrieval backends.

pub mod keyword_retriever;
