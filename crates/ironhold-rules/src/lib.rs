//! Ironhold — Rules & Resolution bounded context.
//!
//! Responsible for interpreting player intent, performing dice checks,
//! and resolving combat exchanges.

pub mod application;
pub mod domain;
