//! Local model store with a binary cache and remote catalog download.
//!
//! Models live in one flat directory. A model named `glove-twitter-25` is
//! either `glove-twitter-25.txt` (word2vec/GloVe text format) or
//! `glove-twitter-25.kv` (bincode cache of the parsed table). Text models are
//! parsed once and cached; later loads read the cache.

use crate::error::{BenchError, Result};
use crate::vectors::KeyedVectors;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension for text-format models.
pub const TEXT_EXT: &str = "txt";
/// Extension for cached, parsed models.
pub const CACHE_EXT: &str = "kv";

/// A directory of stored vector models.
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    /// Create a store over a directory. The directory is not required to
    /// exist until a model is loaded or downloaded.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn text_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{TEXT_EXT}"))
    }

    fn cache_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{CACHE_EXT}"))
    }

    /// Check whether a model is present in any format.
    pub fn contains(&self, name: &str) -> bool {
        self.cache_path(name).is_file() || self.text_path(name).is_file()
    }

    /// Load a model by name.
    ///
    /// Prefers the bincode cache; otherwise parses the text file and writes
    /// the cache for next time. A failed cache write still leaves the parsed
    /// model usable.
    pub fn load(&self, name: &str) -> Result<KeyedVectors> {
        let cache = self.cache_path(name);
        if cache.is_file() {
            return load_cache(&cache);
        }

        let text = self.text_path(name);
        if !text.is_file() {
            return Err(BenchError::ModelNotFound(name.to_string()));
        }

        let content = fs::read_to_string(&text).map_err(|e| BenchError::io(&text, e))?;
        let vectors = KeyedVectors::parse_text(&content)?;

        let _ = write_cache(&cache, &vectors);

        Ok(vectors)
    }

    /// List the model names present in the store, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| BenchError::io(&self.dir, e))?;

        let mut names = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|e| BenchError::io(&self.dir, e))?;
            let path = entry.path();
            let ext = path.extension().and_then(|e| e.to_str());
            if !matches!(ext, Some(TEXT_EXT) | Some(CACHE_EXT)) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.insert(stem.to_string());
            }
        }

        Ok(names.into_iter().collect())
    }

    /// Download a text-format model from the remote catalog into the store.
    ///
    /// The fetched content must parse as a vector table before it is written;
    /// a bad download never lands in the store.
    pub async fn download(&self, name: &str, catalog_base: &str) -> Result<PathBuf> {
        let url = format!(
            "{}/{name}.{TEXT_EXT}",
            catalog_base.trim_end_matches('/')
        );

        let response = reqwest::get(&url).await?;
        if !response.status().is_success() {
            return Err(BenchError::Http(format!(
                "'{url}' returned HTTP {}",
                response.status()
            )));
        }

        let content = response.text().await?;
        KeyedVectors::parse_text(&content)?;

        fs::create_dir_all(&self.dir).map_err(|e| BenchError::io(&self.dir, e))?;
        let path = self.text_path(name);
        fs::write(&path, &content).map_err(|e| BenchError::io(&path, e))?;

        Ok(path)
    }
}

fn load_cache(path: &Path) -> Result<KeyedVectors> {
    let data = fs::read(path).map_err(|e| BenchError::io(path, e))?;
    let config = bincode::config::standard();
    let (vectors, _) = bincode::serde::decode_from_slice(&data, config)
        .map_err(|e| BenchError::Serialization(e.to_string()))?;
    Ok(vectors)
}

fn write_cache(path: &Path, vectors: &KeyedVectors) -> Result<()> {
    let config = bincode::config::standard();
    let data = bincode::serde::encode_to_vec(vectors, config)
        .map_err(|e| BenchError::Serialization(e.to_string()))?;
    fs::write(path, &data).map_err(|e| BenchError::io(path, e))?;
    Ok(())
}
