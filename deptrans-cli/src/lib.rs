//! deptrans CLI library
//!
//! This library provides the command-line interface for oracle replay,
//! vocabulary building and attachment scoring over CoNLL corpora.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
