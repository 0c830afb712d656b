//! The turn pipeline.

pub mod turn_pipeline;
