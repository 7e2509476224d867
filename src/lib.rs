//! sufilter: Feature Selection Library
//!
//! Ranks features by symmetrical uncertainty with a label, estimated over
//! repeated bootstrap samples, and prunes redundant features with the Fast
//! Correlation-Based Filter.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
