//! Exhaustive roster search on top of the simulation engine.
//!
//! Every candidate roster is identified by an index into a mixed-radix
//! [`CandidateSpace`]. Rayon maps indices to simulation results and the
//! partial tallies are merged order-independently, so a [`SearchReport`] is
//! identical at any thread count.

mod driver;
mod report;
mod space;

pub use driver::SearchDriver;
pub use report::{SearchReport, Solution};
pub use space::CandidateSpace;

use sim_core::{ConfigError, SimError};

/// Errors that abort a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("invalid generated config: {0}")]
    Config(#[from] ConfigError),

    #[error("candidate space exceeds u64 indexing")]
    SpaceTooLarge,

    #[error("candidate #{index} failed: {source}")]
    Candidate { index: u64, source: SimError },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
