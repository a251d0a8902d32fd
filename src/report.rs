// Evaluation records — the flat per-subgroup result rows and their
// ordered concatenation. Purely structural composition: scores are merged,
// never recomputed.

use serde::Serialize;

use crate::corpus::Subgroup;
use crate::scoring::coherence::CoherenceScores;
use crate::scoring::diversity::DiversityScores;

/// One subgroup's evaluation result — the union of its coherence scores,
/// diversity scores, and model label. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRecord {
    pub model: String,
    pub c_v: f64,
    pub c_uci: f64,
    pub c_npmi: f64,
    pub unique_words_ratio: f64,
    pub avg_jaccard_distance: f64,
    pub n_topics: usize,
}

impl EvaluationRecord {
    /// Merge one subgroup's scorer outputs into a record.
    pub fn merge(
        subgroup: Subgroup,
        coherence: &CoherenceScores,
        diversity: &DiversityScores,
    ) -> Self {
        Self {
            model: subgroup.label().to_string(),
            c_v: coherence.c_v,
            c_uci: coherence.c_uci,
            c_npmi: coherence.c_npmi,
            unique_words_ratio: diversity.unique_words_ratio,
            avg_jaccard_distance: diversity.avg_jaccard_distance,
            n_topics: diversity.n_topics,
        }
    }
}

/// The combined summary: all subgroup records in evaluation order
/// (female before male).
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationSummary {
    pub records: Vec<EvaluationRecord>,
}

impl EvaluationSummary {
    pub fn new(records: Vec<EvaluationRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
