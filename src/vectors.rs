//! Vector model adapter: vocabulary membership and cosine similarity over a
//! loaded word-embedding table.

use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Read-only queries the evaluation engine makes against one embedding source.
///
/// `similarity` fails if either word lacks a vector; callers are expected to
/// confirm membership with `contains` first.
pub trait VectorModel {
    /// True iff `word` is an exact-match vocabulary entry. Case-sensitive,
    /// no normalization.
    fn contains(&self, word: &str) -> bool;

    /// Cosine similarity between the two word vectors, in [-1, 1].
    fn similarity(&self, word_a: &str, word_b: &str) -> Result<f32>;

    /// Number of distinct vocabulary entries.
    fn vocabulary_size(&self) -> usize;
}

/// One pretrained embedding table: word to fixed-dimension vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyedVectors {
    dimension: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl KeyedVectors {
    /// Build a table from (word, vector) pairs. All vectors must share one
    /// dimension.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let mut dimension = 0;
        let mut vectors = HashMap::new();

        for (word, vector) in pairs {
            if dimension == 0 {
                dimension = vector.len();
            } else if vector.len() != dimension {
                return Err(BenchError::ModelLoad(format!(
                    "inconsistent vector dimensions: expected {dimension}, found {}",
                    vector.len()
                )));
            }
            vectors.insert(word.into(), vector);
        }

        Ok(Self { dimension, vectors })
    }

    /// Parse the word2vec/GloVe text format: one `word v1 v2 ... vn` entry
    /// per line, optionally preceded by a `count dimension` header line.
    pub fn parse_text(content: &str) -> Result<Self> {
        let mut lines = content.lines().enumerate().peekable();

        if let Some((_, first)) = lines.peek() {
            let fields: Vec<&str> = first.split_whitespace().collect();
            if fields.len() == 2 && fields.iter().all(|f| f.parse::<usize>().is_ok()) {
                lines.next();
            }
        }

        let mut dimension = 0;
        let mut vectors = HashMap::new();

        for (idx, line) in lines {
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let word = match fields.next() {
                Some(word) => word,
                None => continue,
            };

            let values: Vec<f32> = fields
                .map(str::parse)
                .collect::<std::result::Result<_, _>>()
                .map_err(|e| {
                    BenchError::ModelLoad(format!("line {}: bad component: {e}", idx + 1))
                })?;

            if values.is_empty() {
                return Err(BenchError::ModelLoad(format!(
                    "line {}: entry '{word}' has no vector components",
                    idx + 1
                )));
            }

            if dimension == 0 {
                dimension = values.len();
            } else if values.len() != dimension {
                return Err(BenchError::ModelLoad(format!(
                    "line {}: entry '{word}' has {} components, expected {dimension}",
                    idx + 1,
                    values.len()
                )));
            }

            vectors.insert(word.to_string(), values);
        }

        if vectors.is_empty() {
            return Err(BenchError::ModelLoad(
                "model contains no vectors".to_string(),
            ));
        }

        Ok(Self { dimension, vectors })
    }

    /// Look up the vector for a word.
    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    /// Vector dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of vocabulary entries.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl VectorModel for KeyedVectors {
    fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    fn similarity(&self, word_a: &str, word_b: &str) -> Result<f32> {
        let a = self
            .get(word_a)
            .ok_or_else(|| BenchError::NotInVocabulary(word_a.to_string()))?;
        let b = self
            .get(word_b)
            .ok_or_else(|| BenchError::NotInVocabulary(word_b.to_string()))?;
        Ok(cosine_similarity(a, b))
    }

    fn vocabulary_size(&self) -> usize {
        self.vectors.len()
    }
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// A named, loaded model with its vocabulary size computed once at load time.
///
/// Created once per configured model name at batch start, never mutated after
/// load.
#[derive(Debug, Clone)]
pub struct ModelHandle {
    name: String,
    vectors: KeyedVectors,
    vocabulary_size: usize,
}

impl ModelHandle {
    /// Wrap a loaded table under a model name.
    pub fn new(name: impl Into<String>, vectors: KeyedVectors) -> Self {
        let vocabulary_size = vectors.len();
        Self {
            name: name.into(),
            vectors,
            vocabulary_size,
        }
    }

    /// The model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying table.
    pub fn vectors(&self) -> &KeyedVectors {
        &self.vectors
    }
}

impl VectorModel for ModelHandle {
    fn contains(&self, word: &str) -> bool {
        self.vectors.contains(word)
    }

    fn similarity(&self, word_a: &str, word_b: &str) -> Result<f32> {
        self.vectors.similarity(word_a, word_b)
    }

    fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }
}
