//! Benchmark dataset loading.
//!
//! The synonym test is a flat CSV file of 6-field rows:
//! `question,answer,option0,option1,option2,option3`. The shipped benchmark
//! file carries a header row, which the loader skips; the engine itself never
//! assumes one.

use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Number of candidate options per question.
pub const OPTION_COUNT: usize = 4;

/// A single multiple-choice synonym question.
///
/// The answer is expected to be one of the four options, but that is not
/// enforced: a malformed row degrades classification (the selected candidate
/// can never equal the answer) without failing the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymQuestion {
    /// The question word.
    pub question: String,
    /// The expected synonym.
    pub answer: String,
    /// Candidate options, in the order they appear in the dataset.
    pub options: [String; OPTION_COUNT],
}

/// The ordered benchmark, shared read-only across all models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Dataset name (derived from the file name).
    pub name: String,
    /// Questions in dataset order.
    pub questions: Vec<SynonymQuestion>,
}

impl Dataset {
    /// Create a new empty dataset.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            questions: Vec::new(),
        }
    }

    /// Number of questions in the dataset.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Check if the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get a subset of the questions (for quick testing).
    pub fn take(&self, n: usize) -> Self {
        Self {
            name: self.name.clone(),
            questions: self.questions.iter().take(n).cloned().collect(),
        }
    }

    /// Load the benchmark from a CSV file.
    ///
    /// A malformed row is fatal: every model is evaluated against the same
    /// dataset, so a bad row affects all of them identically.
    pub fn load_csv(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| BenchError::io(path, e))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut questions = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            // Rows are numbered from 1, after the header.
            let row = idx + 1;
            let record =
                record.map_err(|e| BenchError::Dataset(format!("row {row}: {e}")))?;
            questions.push(parse_record(&record, row)?);
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("benchmark")
            .to_string();

        Ok(Self { name, questions })
    }
}

/// Parse one 6-field record into a question.
fn parse_record(record: &csv::StringRecord, row: usize) -> Result<SynonymQuestion> {
    let arity = 2 + OPTION_COUNT;
    if record.len() != arity {
        return Err(BenchError::Dataset(format!(
            "row {row}: expected {arity} fields, found {}",
            record.len()
        )));
    }

    Ok(SynonymQuestion {
        question: record[0].to_string(),
        answer: record[1].to_string(),
        options: [
            record[2].to_string(),
            record[3].to_string(),
            record[4].to_string(),
            record[5].to_string(),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_csv() {
        let file = write_csv(
            "question,answer,0,1,2,3\n\
             enormously,tremendously,appropriately,uniquely,tremendously,decidedly\n\
             provisions,stipulations,stipulations,interrelations,jurisdictions,interpretations\n",
        );

        let dataset = Dataset::load_csv(file.path()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.questions[0].question, "enormously");
        assert_eq!(dataset.questions[0].answer, "tremendously");
        assert_eq!(dataset.questions[1].options[0], "stipulations");
    }

    #[test]
    fn test_load_preserves_order() {
        let file = write_csv(
            "question,answer,0,1,2,3\n\
             a,b,b,c,d,e\n\
             f,g,g,h,i,j\n\
             k,l,l,m,n,o\n",
        );

        let dataset = Dataset::load_csv(file.path()).unwrap();
        let order: Vec<&str> = dataset
            .questions
            .iter()
            .map(|q| q.question.as_str())
            .collect();
        assert_eq!(order, vec!["a", "f", "k"]);
    }

    #[test]
    fn test_malformed_row_is_fatal() {
        let file = write_csv(
            "question,answer,0,1,2,3\n\
             a,b,b,c,d,e\n\
             short,row,only\n",
        );

        let err = Dataset::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, BenchError::Dataset(_)));
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Dataset::load_csv(Path::new("/nonexistent/synonyms.csv"));
        assert!(matches!(result, Err(BenchError::Io { .. })));
    }

    #[test]
    fn test_take() {
        let file = write_csv(
            "question,answer,0,1,2,3\n\
             a,b,b,c,d,e\n\
             f,g,g,h,i,j\n",
        );

        let dataset = Dataset::load_csv(file.path()).unwrap();
        let subset = dataset.take(1);
        assert_eq!(subset.len(), 1);
        assert_eq!(subset.questions[0].question, "a");
        assert_eq!(subset.name, dataset.name);
    }
}
