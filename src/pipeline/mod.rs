//! Pipeline module - the selection engine and its data loading

pub mod cache;
pub mod candidates;
pub mod dataset;
pub mod entropy;
pub mod error;
pub mod loader;
pub mod pruner;
pub mod relevance;
pub mod sampler;
pub mod selector;

pub use cache::{CacheStats, PairwiseCache};
pub use candidates::{Candidate, CandidateList};
pub use dataset::Dataset;
pub use entropy::*;
pub use error::SelectionError;
pub use loader::*;
pub use pruner::{prune, sampled_pair_su, PairEstimator, PruneOutcome, Redundancy, SampledPairEstimator};
pub use relevance::*;
pub use sampler::{sample_size, Sample, Sampler};
pub use selector::*;
