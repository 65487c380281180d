//! Orchestration services for task normalisation.

mod dates;
mod normalize;

pub use dates::DateResolver;
pub use normalize::{NormalizeOutcome, Normalizer};
