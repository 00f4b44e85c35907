//! Evaluation engine for the synonym benchmark.
//!
//! This module provides:
//! - Per-question evaluation: eligibility, candidate selection, labeling
//! - Per-model aggregation over the full benchmark
//! - Cross-model batch orchestration with partial-failure isolation

pub mod batch;
pub mod question;
pub mod runner;

pub use batch::{BatchResult, ModelFailure, RANDOM_BASELINE, Series, run_batch};
pub use question::{Label, Outcome, evaluate};
pub use runner::{CancelToken, ModelRun, ModelSummary, run_model};
