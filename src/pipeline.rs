// End-to-end evaluation pipeline: per-subgroup scoring plus the combined
// summary table.
//
// A missing per-subgroup artifact is recoverable: that subgroup is skipped
// with a warning and the run continues with the other one. The combined
// summary is only written when every subgroup produced a record.

use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use tracing::{info, warn};

use crate::config::Config;
use crate::corpus::{Corpus, Subgroup};
use crate::output::{csv as csv_out, terminal};
use crate::report::{EvaluationRecord, EvaluationSummary};
use crate::scoring::{coherence, diversity};
use crate::topics::model::ModelTopicSource;
use crate::topics::table::TableTopicSource;
use crate::topics::traits::TopicSource;

/// Which topic-model artifact a run reads topics from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicSourceKind {
    /// Serialized topic model (JSON)
    Model,
    /// Exported topic table (CSV with Topic/Representation columns)
    Table,
}

impl TopicSourceKind {
    /// Resolve the input artifact path for a subgroup.
    pub fn path(self, config: &Config, subgroup: Subgroup) -> PathBuf {
        match self {
            TopicSourceKind::Model => config.model_path(subgroup),
            TopicSourceKind::Table => config.table_path(subgroup),
        }
    }

    /// Open the artifact behind the common trait.
    pub fn open(self, path: &Path) -> Result<Box<dyn TopicSource>> {
        match self {
            TopicSourceKind::Model => Ok(Box::new(ModelTopicSource::load(path)?)),
            TopicSourceKind::Table => Ok(Box::new(TableTopicSource::load(path)?)),
        }
    }
}

/// Run the full evaluation: corpus load, both subgroups, combined summary.
///
/// Returns the summary when every subgroup was evaluated; `None` when at
/// least one was skipped, in which case no summary file is written.
pub fn run(
    config: &Config,
    kind: TopicSourceKind,
    top_n_words: usize,
) -> Result<Option<EvaluationSummary>> {
    config.require_corpus()?;

    println!("Loading corpus from {}...", config.corpus_path.display());
    let corpus = Corpus::load(&config.corpus_path, &config.doc_column, &config.group_column)?;
    println!("Loaded {} documents", corpus.len());

    let mut records = Vec::new();
    for subgroup in Subgroup::ALL {
        if let Some(record) = evaluate_subgroup(config, &corpus, subgroup, kind, top_n_words)? {
            records.push(record);
        }
    }

    if records.len() < Subgroup::ALL.len() {
        return Ok(None);
    }

    let summary = EvaluationSummary::new(records);
    terminal::display_summary(&summary);
    let path = config.results_dir.join("model_evaluation_summary.csv");
    csv_out::write_summary(&path, &summary)?;
    println!("Combined results saved to: {}", path.display());
    Ok(Some(summary))
}

/// Evaluate one subgroup end to end: extract topics, score coherence and
/// diversity, write the per-subgroup result table.
pub fn evaluate_subgroup(
    config: &Config,
    corpus: &Corpus,
    subgroup: Subgroup,
    kind: TopicSourceKind,
    top_n_words: usize,
) -> Result<Option<EvaluationRecord>> {
    let path = kind.path(config, subgroup);
    if !path.exists() {
        warn!(subgroup = %subgroup, path = %path.display(), "Topic source not found; skipping subgroup");
        println!(
            "{}",
            format!("Warning: {subgroup} topic source not found at {}", path.display()).yellow()
        );
        return Ok(None);
    }

    println!("\n{}", format!("=== Evaluating {} ===", subgroup.label()).bold());

    let topics = kind.open(&path)?.extract(top_n_words)?;
    println!(
        "Extracted {} topics (excluding outlier topic -1)",
        topics.n_topics()
    );

    let documents = corpus.documents_for(subgroup);
    info!(subgroup = %subgroup, documents = documents.len(), "Corpus slice selected");

    println!("Calculating coherence for {} topics...", topics.n_topics());
    let coherence_scores = coherence::score(&topics, &documents);

    println!("Calculating diversity metrics...");
    let diversity_scores = diversity::score(&topics);

    let record = EvaluationRecord::merge(subgroup, &coherence_scores, &diversity_scores);
    terminal::display_record(&record);

    let out_path = config
        .results_dir
        .join(format!("coherence_{}.csv", subgroup.slug()));
    csv_out::write_record(&out_path, &record)?;
    println!("Saved to: {}", out_path.display());

    Ok(Some(record))
}
