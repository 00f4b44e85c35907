//! Per-model benchmark run: drives the evaluator over the dataset in order
//! and folds the outcomes into a summary.

use super::question::{Label, Outcome, evaluate};
use crate::dataset::Dataset;
use crate::error::{BenchError, Result};
use crate::vectors::{ModelHandle, VectorModel};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation signal, checked between questions.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Per-model aggregate statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Model name.
    pub model_name: String,
    /// Vocabulary entries in the model.
    pub vocabulary_size: usize,
    /// Questions answered correctly.
    pub correct_count: usize,
    /// Questions where any candidate was selected, right or wrong.
    /// Accuracy is correct/answered, not correct/total.
    pub answered_count: usize,
}

impl ModelSummary {
    /// `correct_count / answered_count`. Undefined when the model attempted
    /// nothing, surfaced as `NoAttempts` rather than a division fault.
    pub fn accuracy(&self) -> Result<f64> {
        if self.answered_count == 0 {
            return Err(BenchError::NoAttempts(self.model_name.clone()));
        }
        Ok(self.correct_count as f64 / self.answered_count as f64)
    }
}

/// One completed model evaluation: outcomes in dataset order plus summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRun {
    /// Aggregate statistics.
    pub summary: ModelSummary,
    /// One outcome per question, same order as the dataset.
    pub outcomes: Vec<Outcome>,
}

impl ModelRun {
    /// Questions that classified as `Guess`.
    pub fn guess_count(&self) -> usize {
        self.outcomes.len() - self.summary.answered_count
    }
}

/// Evaluate every question in dataset order against one model.
///
/// Fails with `NoAttempts` if the model abstained on the whole benchmark,
/// and with `Cancelled` if the token fires between questions; both are
/// per-model conditions the batch orchestrator records without aborting.
pub fn run_model(
    handle: &ModelHandle,
    dataset: &Dataset,
    cancel: &CancelToken,
) -> Result<ModelRun> {
    let mut outcomes = Vec::with_capacity(dataset.len());
    let mut correct_count = 0;
    let mut answered_count = 0;

    for question in &dataset.questions {
        if cancel.is_cancelled() {
            return Err(BenchError::Cancelled(handle.name().to_string()));
        }

        let outcome = evaluate(question, handle);
        match outcome.label {
            Label::Correct => {
                correct_count += 1;
                answered_count += 1;
            }
            Label::Wrong => answered_count += 1,
            Label::Guess => {}
        }
        outcomes.push(outcome);
    }

    if answered_count == 0 {
        return Err(BenchError::NoAttempts(handle.name().to_string()));
    }

    Ok(ModelRun {
        summary: ModelSummary {
            model_name: handle.name().to_string(),
            vocabulary_size: handle.vocabulary_size(),
            correct_count,
            answered_count,
        },
        outcomes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SynonymQuestion;
    use crate::vectors::KeyedVectors;

    fn question(q: &str, answer: &str, options: [&str; 4]) -> SynonymQuestion {
        SynonymQuestion {
            question: q.to_string(),
            answer: answer.to_string(),
            options: options.map(str::to_string),
        }
    }

    /// Three questions: one correct, one wrong, one guess (question word OOV).
    fn mixed_fixture() -> (ModelHandle, Dataset) {
        let vectors = KeyedVectors::from_pairs([
            ("happy", vec![1.0, 0.0]),
            ("glad", vec![0.8, 0.6]),
            ("sad", vec![0.3, 0.954]),
            ("large", vec![1.0, 0.0]),
            ("big", vec![0.6, 0.8]),
            ("small", vec![0.954, 0.3]),
        ])
        .unwrap();
        let handle = ModelHandle::new("mixed", vectors);

        let mut dataset = Dataset::new("test");
        dataset
            .questions
            .push(question("happy", "glad", ["glad", "sad", "x", "y"]));
        dataset
            .questions
            .push(question("large", "big", ["small", "big", "x", "y"]));
        dataset
            .questions
            .push(question("missing", "glad", ["glad", "sad", "x", "y"]));
        (handle, dataset)
    }

    #[test]
    fn test_run_model_counts() {
        let (handle, dataset) = mixed_fixture();
        let run = run_model(&handle, &dataset, &CancelToken::new()).unwrap();

        assert_eq!(run.summary.model_name, "mixed");
        assert_eq!(run.summary.vocabulary_size, 6);
        assert_eq!(run.summary.correct_count, 1);
        assert_eq!(run.summary.answered_count, 2);
        assert_eq!(run.guess_count(), 1);
        assert!((run.summary.accuracy().unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_outcomes_preserve_dataset_order() {
        let (handle, dataset) = mixed_fixture();
        let run = run_model(&handle, &dataset, &CancelToken::new()).unwrap();

        assert_eq!(run.outcomes.len(), dataset.len());
        for (outcome, question) in run.outcomes.iter().zip(&dataset.questions) {
            assert_eq!(outcome.question, question.question);
        }
    }

    #[test]
    fn test_accuracy_is_one_when_all_answered_correct() {
        let (handle, mut dataset) = mixed_fixture();
        dataset.questions.truncate(1);

        let run = run_model(&handle, &dataset, &CancelToken::new()).unwrap();
        assert_eq!(run.summary.accuracy().unwrap(), 1.0);
    }

    #[test]
    fn test_no_attempts_surfaces_as_error() {
        // The model's vocabulary shares nothing with the benchmark.
        let vectors = KeyedVectors::from_pairs([("unrelated", vec![1.0])]).unwrap();
        let handle = ModelHandle::new("abstainer", vectors);

        let mut dataset = Dataset::new("test");
        dataset
            .questions
            .push(question("happy", "glad", ["glad", "sad", "x", "y"]));

        let err = run_model(&handle, &dataset, &CancelToken::new()).unwrap_err();
        assert!(matches!(err, BenchError::NoAttempts(name) if name == "abstainer"));
    }

    #[test]
    fn test_cancelled_before_first_question() {
        let (handle, dataset) = mixed_fixture();
        let cancel = CancelToken::new();
        cancel.cancel();

        let err = run_model(&handle, &dataset, &cancel).unwrap_err();
        assert!(matches!(err, BenchError::Cancelled(name) if name == "mixed"));
    }

    #[test]
    fn test_summary_accuracy_no_attempts() {
        let summary = ModelSummary {
            model_name: "m".to_string(),
            vocabulary_size: 0,
            correct_count: 0,
            answered_count: 0,
        };
        assert!(matches!(
            summary.accuracy(),
            Err(BenchError::NoAttempts(_))
        ));
    }
}
