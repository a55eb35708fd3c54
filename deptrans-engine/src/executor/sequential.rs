//! Sequential execution strategy

use crate::{
    error::Result,
    executor::{ExecutionMode, Executor},
};
use deptrans_core::Sentence;

/// Sequential single-threaded executor
#[derive(Debug, Clone, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn run<T, F>(&self, sentences: &[Sentence], job: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(usize, &Sentence) -> Result<T> + Send + Sync,
    {
        sentences
            .iter()
            .enumerate()
            .map(|(index, sentence)| job(index, sentence))
            .collect()
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }
}
