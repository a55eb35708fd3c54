//! Configuration types for the engine

use crate::ExecutionMode;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Execution mode selector
    pub execution_mode: ExecutionMode,
    /// Number of threads for parallel execution (None = auto)
    pub threads: Option<usize>,
    /// Sentence count at which adaptive mode switches to parallel
    pub parallel_threshold: usize,
    /// Skip sentences without a single gold arc instead of replaying them
    pub skip_degenerate: bool,
    /// Fail when oracle replay does not reproduce the gold tree
    pub verify_replay: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            execution_mode: ExecutionMode::Adaptive,
            threads: None,
            parallel_threshold: 256,
            skip_degenerate: true,
            verify_replay: true,
        }
    }
}

impl EngineConfig {
    /// Single-threaded configuration
    pub fn sequential() -> Self {
        Self {
            execution_mode: ExecutionMode::Sequential,
            threads: Some(1),
            parallel_threshold: usize::MAX,
            ..Self::default()
        }
    }

    /// Always fan out over the thread pool
    pub fn parallel() -> Self {
        Self {
            execution_mode: ExecutionMode::Parallel,
            parallel_threshold: 0,
            ..Self::default()
        }
    }

    /// Number of worker threads this configuration will use
    pub fn effective_threads(&self) -> usize {
        match self.execution_mode {
            ExecutionMode::Sequential => 1,
            _ => self.threads.unwrap_or_else(num_cpus::get).max(1),
        }
    }

    /// Reject settings that cannot be executed
    pub fn validate(&self) -> crate::Result<()> {
        if self.threads == Some(0) {
            return Err(crate::EngineError::Config(
                "thread count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
