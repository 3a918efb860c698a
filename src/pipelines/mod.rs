//! Pipelines.
//!
//! The module provides a light [pipeline::Pipeline] trait that the
//! validation and deduplication passes implement.
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use pipeline::Pipeline;
