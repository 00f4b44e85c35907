//! Batch orchestration: run every configured model over the shared benchmark,
//! isolating per-model failures and assembling the comparison series.

use super::runner::{CancelToken, ModelRun, run_model};
use crate::dataset::Dataset;
use crate::store::ModelStore;
use crate::vectors::ModelHandle;
use serde::{Deserialize, Serialize};

/// Expected accuracy of uniform random guessing over four options, appended
/// to the accuracy series as a reference entry.
pub const RANDOM_BASELINE: f64 = 0.25;

/// Label used for the synthetic baseline entry.
pub const RANDOM_BASELINE_LABEL: &str = "Random";

/// A model that failed to produce results, with the reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFailure {
    /// Model name.
    pub model: String,
    /// Failure reason (load error, no attempts, cancellation).
    pub reason: String,
}

/// Parallel label/value series handed to the charting collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Model names, in configured order.
    pub labels: Vec<String>,
    /// One value per label.
    pub values: Vec<f64>,
}

/// Results of one batch: completed runs in configured model order, plus a
/// side list of failed models. No model is silently omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// Benchmark name.
    pub dataset_name: String,
    /// Questions per model.
    pub total_questions: usize,
    /// Models that completed, in configured order.
    pub completed: Vec<ModelRun>,
    /// Models that failed, with reasons.
    pub failures: Vec<ModelFailure>,
}

impl BatchResult {
    /// `(model, accuracy)` over completed models, with the random-guessing
    /// reference appended as a final synthetic entry.
    pub fn accuracy_series(&self) -> Series {
        let mut labels: Vec<String> = Vec::with_capacity(self.completed.len() + 1);
        let mut values: Vec<f64> = Vec::with_capacity(self.completed.len() + 1);

        for run in &self.completed {
            // Completed runs always answered at least one question.
            if let Ok(accuracy) = run.summary.accuracy() {
                labels.push(run.summary.model_name.clone());
                values.push(accuracy);
            }
        }

        labels.push(RANDOM_BASELINE_LABEL.to_string());
        values.push(RANDOM_BASELINE);

        Series { labels, values }
    }

    /// `(model, guess count)` over completed models.
    pub fn guess_series(&self) -> Series {
        Series {
            labels: self
                .completed
                .iter()
                .map(|run| run.summary.model_name.clone())
                .collect(),
            values: self
                .completed
                .iter()
                .map(|run| run.guess_count() as f64)
                .collect(),
        }
    }

    /// Print a summary table listing every model, successful or failed.
    pub fn print_summary(&self) {
        println!("\n========== Synonym Benchmark ==========");
        println!("Dataset: {} ({} questions)", self.dataset_name, self.total_questions);
        println!("---------------------------------------");

        for run in &self.completed {
            let summary = &run.summary;
            let accuracy = summary.accuracy().unwrap_or(0.0);
            println!(
                "{:<28} vocab {:>9}  correct {:>3}  answered {:>3}  accuracy {:>5.1}%",
                summary.model_name,
                summary.vocabulary_size,
                summary.correct_count,
                summary.answered_count,
                accuracy * 100.0
            );
        }

        for failure in &self.failures {
            println!("{:<28} FAILED: {}", failure.model, failure.reason);
        }

        println!("---------------------------------------");
        println!(
            "Completed {}/{} models",
            self.completed.len(),
            self.completed.len() + self.failures.len()
        );
        println!("=======================================\n");
    }
}

/// Run the benchmark for every configured model, sequentially.
///
/// A model that fails to load, abstains on every question, or is cancelled is
/// recorded in the failure list; it never aborts the rest of the batch.
pub fn run_batch(
    store: &ModelStore,
    model_names: &[String],
    dataset: &Dataset,
    cancel: &CancelToken,
) -> BatchResult {
    let mut result = BatchResult {
        dataset_name: dataset.name.clone(),
        total_questions: dataset.len(),
        completed: Vec::new(),
        failures: Vec::new(),
    };

    for name in model_names {
        println!("Evaluating model {name}...");

        let vectors = match store.load(name) {
            Ok(vectors) => vectors,
            Err(e) => {
                result.failures.push(ModelFailure {
                    model: name.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let handle = ModelHandle::new(name.clone(), vectors);
        match run_model(&handle, dataset, cancel) {
            Ok(run) => result.completed.push(run),
            Err(e) => result.failures.push(ModelFailure {
                model: name.clone(),
                reason: e.to_string(),
            }),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SynonymQuestion;
    use std::fs;
    use tempfile::TempDir;

    fn question(q: &str, answer: &str, options: [&str; 4]) -> SynonymQuestion {
        SynonymQuestion {
            question: q.to_string(),
            answer: answer.to_string(),
            options: options.map(str::to_string),
        }
    }

    fn benchmark() -> Dataset {
        let mut dataset = Dataset::new("test");
        dataset
            .questions
            .push(question("happy", "glad", ["glad", "sad", "x", "y"]));
        dataset
            .questions
            .push(question("big", "large", ["large", "small", "x", "y"]));
        dataset
    }

    /// A store with one model that answers both questions and one that
    /// covers no question words.
    fn seeded_store() -> (TempDir, ModelStore) {
        let dir = TempDir::new().unwrap();
        let store = ModelStore::new(dir.path());

        fs::write(
            dir.path().join("good.txt"),
            "happy 1.0 0.0\nglad 0.9 0.43\nsad 0.2 0.98\n\
             big 0.0 1.0\nlarge 0.42 0.9\nsmall 0.98 0.2\n",
        )
        .unwrap();
        fs::write(dir.path().join("abstainer.txt"), "unrelated 1.0 0.0\n").unwrap();

        (dir, store)
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_batch_isolates_failures() {
        // Scenario E: an all-guess model and a missing model are recorded as
        // failures, the good model's results are unaffected.
        let (_dir, store) = seeded_store();
        let dataset = benchmark();

        let batch = run_batch(
            &store,
            &names(&["good", "abstainer", "missing"]),
            &dataset,
            &CancelToken::new(),
        );

        assert_eq!(batch.completed.len(), 1);
        assert_eq!(batch.completed[0].summary.model_name, "good");
        assert_eq!(batch.completed[0].summary.correct_count, 2);

        assert_eq!(batch.failures.len(), 2);
        assert_eq!(batch.failures[0].model, "abstainer");
        assert!(batch.failures[0].reason.contains("no questions"));
        assert_eq!(batch.failures[1].model, "missing");
        assert!(batch.failures[1].reason.contains("not found"));
    }

    #[test]
    fn test_accuracy_series_appends_baseline() {
        let (_dir, store) = seeded_store();
        let dataset = benchmark();

        let batch = run_batch(&store, &names(&["good"]), &dataset, &CancelToken::new());
        let series = batch.accuracy_series();

        assert_eq!(series.labels, vec!["good", "Random"]);
        assert_eq!(series.values.len(), 2);
        assert_eq!(series.values[0], 1.0);
        assert_eq!(series.values[1], RANDOM_BASELINE);
    }

    #[test]
    fn test_failed_models_are_excluded_from_series() {
        let (_dir, store) = seeded_store();
        let dataset = benchmark();

        let batch = run_batch(
            &store,
            &names(&["good", "abstainer"]),
            &dataset,
            &CancelToken::new(),
        );

        let series = batch.accuracy_series();
        assert!(!series.labels.contains(&"abstainer".to_string()));

        let guesses = batch.guess_series();
        assert_eq!(guesses.labels, vec!["good"]);
        assert_eq!(guesses.values, vec![0.0]);
    }

    #[test]
    fn test_cancellation_is_recorded_per_model() {
        let (_dir, store) = seeded_store();
        let dataset = benchmark();

        let cancel = CancelToken::new();
        cancel.cancel();

        let batch = run_batch(&store, &names(&["good"]), &dataset, &cancel);

        assert!(batch.completed.is_empty());
        assert_eq!(batch.failures.len(), 1);
        assert!(batch.failures[0].reason.contains("cancelled"));
    }
}
