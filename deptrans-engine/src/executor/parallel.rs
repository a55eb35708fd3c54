//! Parallel execution strategy

use crate::{
    error::{EngineError, Result},
    executor::{ExecutionMode, Executor},
};
use deptrans_core::Sentence;
use rayon::prelude::*;

/// Parallel multi-threaded executor
#[derive(Debug, Clone, Default)]
pub struct ParallelExecutor {
    threads: Option<usize>,
}

impl ParallelExecutor {
    /// Create a new parallel executor; `None` uses rayon's global pool
    pub fn new(threads: Option<usize>) -> Self {
        Self { threads }
    }

    fn run_in_pool<T, F>(&self, sentences: &[Sentence], job: &F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(usize, &Sentence) -> Result<T> + Send + Sync,
    {
        sentences
            .par_iter()
            .enumerate()
            .map(|(index, sentence)| job(index, sentence))
            .collect()
    }
}

impl Executor for ParallelExecutor {
    fn run<T, F>(&self, sentences: &[Sentence], job: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(usize, &Sentence) -> Result<T> + Send + Sync,
    {
        match self.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| EngineError::Parallel(e.to_string()))?;
                log::debug!("running {} sentences on {} threads", sentences.len(), threads);
                pool.install(|| self.run_in_pool(sentences, &job))
            }
            None => self.run_in_pool(sentences, &job),
        }
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}
