//! Execution strategies for per-sentence jobs
//!
//! Sentences are independent: each job owns its own [`ParserState`], so the
//! only shared data is read-only (the corpus slice and, when decoding, the
//! label vocabulary).
//!
//! [`ParserState`]: deptrans_core::ParserState

use crate::error::Result;
use deptrans_core::Sentence;

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Single-threaded sequential processing
    Sequential,
    /// Multi-threaded parallel processing
    Parallel,
    /// Pick sequential or parallel from the corpus size
    Adaptive,
}

/// Trait for execution strategies
pub trait Executor: Send + Sync {
    /// Run `job` over every sentence, keeping corpus order in the output
    ///
    /// The first failing job aborts the run.
    fn run<T, F>(&self, sentences: &[Sentence], job: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(usize, &Sentence) -> Result<T> + Send + Sync;

    /// Get the execution mode
    fn mode(&self) -> ExecutionMode;
}

/// Automatically select execution mode based on corpus size
pub fn auto_select(sentence_count: usize, threshold: usize) -> ExecutionMode {
    if sentence_count < 2 || sentence_count < threshold {
        ExecutionMode::Sequential
    } else {
        #[cfg(feature = "parallel")]
        return ExecutionMode::Parallel;

        #[cfg(not(feature = "parallel"))]
        ExecutionMode::Sequential
    }
}
