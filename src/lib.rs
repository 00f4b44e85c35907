//! Synonym Benchmark - evaluates pretrained word-embedding models on a
//! multiple-choice synonym test.
//!
//! # Overview
//!
//! Each benchmark question pairs a question word with four candidate options.
//! For every configured model the engine:
//! 1. Checks that the question word and at least one option have vectors
//! 2. Picks the in-vocabulary option most similar to the question word
//! 3. Classifies the outcome as correct, wrong, or a guess (no attempt)
//!
//! Per-model outcomes fold into summaries, and a batch orchestrator runs the
//! configured model set with per-model failure isolation, producing the
//! accuracy and guess-count comparison series used for reporting.
//!
//! # Quick Start
//!
//! ```no_run
//! use synonym_bench::{
//!     dataset::Dataset,
//!     eval::{CancelToken, run_batch},
//!     report::ReportWriter,
//!     store::ModelStore,
//! };
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let dataset = Dataset::load_csv(Path::new("synonyms.csv"))?;
//!     let store = ModelStore::new("saved_models");
//!     let models = vec!["glove-twitter-25".to_string()];
//!
//!     let batch = run_batch(&store, &models, &dataset, &CancelToken::new());
//!     batch.print_summary();
//!
//!     let writer = ReportWriter::create("outputs")?;
//!     writer.write_all(&batch)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **Dataset**: ordered benchmark questions parsed from CSV
//! - **KeyedVectors / ModelHandle**: one loaded embedding table per model
//! - **ModelStore**: local model directory with cache and catalog download
//! - **eval**: the evaluation engine (question, runner, batch)
//! - **ReportWriter**: flat CSV reports and chart series

pub mod config;
pub mod dataset;
pub mod error;
pub mod eval;
pub mod report;
pub mod store;
pub mod vectors;

// Re-export commonly used types
pub use config::Config;
pub use dataset::{Dataset, SynonymQuestion};
pub use error::{BenchError, Result};
pub use eval::{BatchResult, CancelToken, Label, ModelRun, ModelSummary, Outcome, run_batch};
pub use report::ReportWriter;
pub use store::ModelStore;
pub use vectors::{KeyedVectors, ModelHandle, VectorModel};
