use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::corpus::Subgroup;

/// Central configuration loaded from environment variables.
///
/// All paths are resolved against `TMEVAL_DATA_DIR` (default: the current
/// directory). The .env file is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Project root that all default paths hang off
    pub data_dir: PathBuf,
    /// Reference document corpus (CSV)
    pub corpus_path: PathBuf,
    /// Directory where result tables are written
    pub results_dir: PathBuf,
    /// Corpus column holding the document tokens (default "d2")
    pub doc_column: String,
    /// Corpus column holding the subgroup membership value (default "SEX")
    pub group_column: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every field has a default — a run with no environment at all looks
    /// for its inputs relative to the current directory.
    pub fn load() -> Result<Self> {
        let data_dir = env::var("TMEVAL_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let corpus_path = env::var("TMEVAL_CORPUS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("data").join("corpus.csv"));

        let results_dir = env::var("TMEVAL_RESULTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("results").join("evaluation"));

        Ok(Self {
            data_dir,
            corpus_path,
            results_dir,
            doc_column: env::var("TMEVAL_DOC_COLUMN").unwrap_or_else(|_| "d2".to_string()),
            group_column: env::var("TMEVAL_GROUP_COLUMN").unwrap_or_else(|_| "SEX".to_string()),
        })
    }

    /// Path to a subgroup's serialized topic model (JSON).
    pub fn model_path(&self, subgroup: Subgroup) -> PathBuf {
        self.data_dir
            .join("models")
            .join(format!("topic_model_{}.json", subgroup.slug()))
    }

    /// Path to a subgroup's exported topic table (CSV).
    pub fn table_path(&self, subgroup: Subgroup) -> PathBuf {
        self.data_dir
            .join("models")
            .join(format!("topics_info_{}.csv", subgroup.slug()))
    }

    /// Check that the reference corpus exists.
    /// Call this before any operation that needs coherence scoring.
    pub fn require_corpus(&self) -> Result<()> {
        if !self.corpus_path.exists() {
            anyhow::bail!(
                "Corpus file not found: {}\n\
                 Set TMEVAL_CORPUS_PATH (or TMEVAL_DATA_DIR) in your .env file.",
                self.corpus_path.display()
            );
        }
        Ok(())
    }
}
