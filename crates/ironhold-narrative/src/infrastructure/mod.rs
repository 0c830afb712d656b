//! Adapters for external narrative backends.

pub mod chat_service;
