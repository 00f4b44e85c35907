//! Report writing: per-question details, per-model analysis, chart series.
//!
//! Everything here renders already-computed results as flat CSV rows; nothing
//! feeds back into the engine.

use crate::error::{BenchError, Result};
use crate::eval::batch::{BatchResult, Series};
use crate::eval::runner::ModelRun;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-model summary table, one row per configured model.
pub const ANALYSIS_FILENAME: &str = "analysis.csv";
/// Accuracy comparison series for the plotting collaborator.
pub const ACCURACY_SERIES_FILENAME: &str = "accuracy.csv";
/// Guess-count comparison series for the plotting collaborator.
pub const GUESS_SERIES_FILENAME: &str = "guesses.csv";

const DETAILS_SUFFIX: &str = "-details.csv";

/// Writes benchmark reports into one output directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    /// Create the output directory and remove report files left over from a
    /// previous run.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let writer = Self { dir: dir.into() };

        fs::create_dir_all(&writer.dir).map_err(|e| BenchError::io(&writer.dir, e))?;
        writer.remove_stale_reports()?;

        Ok(writer)
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write every report for a batch: one details file per completed model,
    /// the analysis table, and the two chart series. Returns the written
    /// paths.
    pub fn write_all(&self, batch: &BatchResult) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for run in &batch.completed {
            written.push(self.write_details(run)?);
        }
        written.push(self.write_analysis(batch)?);
        written.push(self.write_series(
            ACCURACY_SERIES_FILENAME,
            "accuracy",
            &batch.accuracy_series(),
        )?);
        written.push(self.write_series(
            GUESS_SERIES_FILENAME,
            "guess_count",
            &batch.guess_series(),
        )?);

        Ok(written)
    }

    /// Write one model's per-question outcome rows:
    /// `question,answer,selected,label`. An absent candidate renders as an
    /// empty field.
    pub fn write_details(&self, run: &ModelRun) -> Result<PathBuf> {
        let path = self
            .dir
            .join(format!("{}{DETAILS_SUFFIX}", run.summary.model_name));
        let mut writer = open_csv(&path)?;

        write_row(&mut writer, &path, ["question", "answer", "selected", "label"])?;
        for outcome in &run.outcomes {
            write_row(
                &mut writer,
                &path,
                [
                    outcome.question.as_str(),
                    outcome.expected.as_str(),
                    outcome.selected.as_deref().unwrap_or(""),
                    outcome.label.as_str(),
                ],
            )?;
        }

        finish_csv(writer, &path)?;
        Ok(path)
    }

    /// Write the per-model analysis table. Completed models carry their five
    /// summary fields; failed models carry the failure reason inline, so no
    /// model is silently omitted.
    pub fn write_analysis(&self, batch: &BatchResult) -> Result<PathBuf> {
        let path = self.dir.join(ANALYSIS_FILENAME);
        let mut writer = open_csv(&path)?;

        write_row(
            &mut writer,
            &path,
            [
                "model",
                "vocabulary_size",
                "correct",
                "answered",
                "accuracy",
                "error",
            ],
        )?;

        for run in &batch.completed {
            let summary = &run.summary;
            let accuracy = summary.accuracy().unwrap_or(0.0);
            write_row(
                &mut writer,
                &path,
                [
                    summary.model_name.as_str(),
                    &summary.vocabulary_size.to_string(),
                    &summary.correct_count.to_string(),
                    &summary.answered_count.to_string(),
                    &format!("{accuracy:.4}"),
                    "",
                ],
            )?;
        }

        for failure in &batch.failures {
            write_row(
                &mut writer,
                &path,
                [failure.model.as_str(), "", "", "", "", failure.reason.as_str()],
            )?;
        }

        finish_csv(writer, &path)?;
        Ok(path)
    }

    fn write_series(&self, filename: &str, value_column: &str, series: &Series) -> Result<PathBuf> {
        let path = self.dir.join(filename);
        let mut writer = open_csv(&path)?;

        write_row(&mut writer, &path, ["model", value_column])?;
        for (label, value) in series.labels.iter().zip(&series.values) {
            write_row(&mut writer, &path, [label.as_str(), &format!("{value:.4}")])?;
        }

        finish_csv(writer, &path)?;
        Ok(path)
    }

    fn remove_stale_reports(&self) -> Result<()> {
        let entries = fs::read_dir(&self.dir).map_err(|e| BenchError::io(&self.dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| BenchError::io(&self.dir, e))?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let stale = name == ANALYSIS_FILENAME
                || name == ACCURACY_SERIES_FILENAME
                || name == GUESS_SERIES_FILENAME
                || name.ends_with(DETAILS_SUFFIX);

            if stale {
                fs::remove_file(&path).map_err(|e| BenchError::io(&path, e))?;
            }
        }

        Ok(())
    }
}

fn open_csv(path: &Path) -> Result<csv::Writer<fs::File>> {
    csv::Writer::from_path(path)
        .map_err(|e| BenchError::Report(format!("'{}': {e}", path.display())))
}

fn write_row<const N: usize>(
    writer: &mut csv::Writer<fs::File>,
    path: &Path,
    row: [&str; N],
) -> Result<()> {
    writer
        .write_record(row)
        .map_err(|e| BenchError::Report(format!("'{}': {e}", path.display())))
}

fn finish_csv(mut writer: csv::Writer<fs::File>, path: &Path) -> Result<()> {
    writer
        .flush()
        .map_err(|e| BenchError::Report(format!("'{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::batch::ModelFailure;
    use crate::eval::question::{Label, Outcome};
    use crate::eval::runner::ModelSummary;
    use tempfile::TempDir;

    fn sample_batch() -> BatchResult {
        let run = ModelRun {
            summary: ModelSummary {
                model_name: "tiny".to_string(),
                vocabulary_size: 42,
                correct_count: 1,
                answered_count: 2,
            },
            outcomes: vec![
                Outcome {
                    question: "happy".to_string(),
                    expected: "glad".to_string(),
                    selected: Some("glad".to_string()),
                    label: Label::Correct,
                },
                Outcome {
                    question: "big".to_string(),
                    expected: "large".to_string(),
                    selected: Some("small".to_string()),
                    label: Label::Wrong,
                },
                Outcome {
                    question: "rare".to_string(),
                    expected: "scarce".to_string(),
                    selected: None,
                    label: Label::Guess,
                },
            ],
        };

        BatchResult {
            dataset_name: "test".to_string(),
            total_questions: 3,
            completed: vec![run],
            failures: vec![ModelFailure {
                model: "broken".to_string(),
                reason: "Model 'broken' not found in the local store".to_string(),
            }],
        }
    }

    #[test]
    fn test_write_all() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::create(dir.path()).unwrap();

        let written = writer.write_all(&sample_batch()).unwrap();
        assert_eq!(written.len(), 4);

        assert!(dir.path().join("tiny-details.csv").is_file());
        assert!(dir.path().join(ANALYSIS_FILENAME).is_file());
        assert!(dir.path().join(ACCURACY_SERIES_FILENAME).is_file());
        assert!(dir.path().join(GUESS_SERIES_FILENAME).is_file());
    }

    #[test]
    fn test_details_rows() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::create(dir.path()).unwrap();
        let batch = sample_batch();

        let path = writer.write_details(&batch.completed[0]).unwrap();
        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "question,answer,selected,label");
        assert_eq!(lines[1], "happy,glad,glad,correct");
        assert_eq!(lines[2], "big,large,small,wrong");
        // No candidate renders as an empty field, not a placeholder word.
        assert_eq!(lines[3], "rare,scarce,,guess");
    }

    #[test]
    fn test_analysis_lists_failures_inline() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::create(dir.path()).unwrap();

        let path = writer.write_analysis(&sample_batch()).unwrap();
        let content = fs::read_to_string(path).unwrap();

        assert!(content.contains("tiny,42,1,2,0.5000,"));
        assert!(content.contains("broken,,,,,"));
        assert!(content.contains("not found in the local store"));
    }

    #[test]
    fn test_series_files_include_baseline() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::create(dir.path()).unwrap();

        writer.write_all(&sample_batch()).unwrap();
        let accuracy = fs::read_to_string(dir.path().join(ACCURACY_SERIES_FILENAME)).unwrap();

        assert!(accuracy.starts_with("model,accuracy"));
        assert!(accuracy.contains("tiny,0.5000"));
        assert!(accuracy.contains("Random,0.2500"));

        let guesses = fs::read_to_string(dir.path().join(GUESS_SERIES_FILENAME)).unwrap();
        assert!(guesses.contains("tiny,1.0000"));
        assert!(!guesses.contains("Random"));
    }

    #[test]
    fn test_create_removes_stale_reports() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("old-details.csv"), "stale").unwrap();
        fs::write(dir.path().join(ANALYSIS_FILENAME), "stale").unwrap();
        fs::write(dir.path().join("keep.txt"), "kept").unwrap();

        ReportWriter::create(dir.path()).unwrap();

        assert!(!dir.path().join("old-details.csv").exists());
        assert!(!dir.path().join(ANALYSIS_FILENAME).exists());
        assert!(dir.path().join("keep.txt").exists());
    }
}
