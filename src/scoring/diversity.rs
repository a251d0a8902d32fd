// Diversity scoring — how distinct the topics are from one another.
//
// Pure function of the topic set; no corpus needed. Two measures: the ratio
// of distinct tokens to total token occurrences, and the average Jaccard
// distance over all unordered topic pairs. Both treat topics as token sets,
// so the scores are invariant to topic order and token order.

use std::collections::HashSet;

use serde::Serialize;

use crate::topics::set::TopicSet;

/// Diversity metrics for one topic set.
#[derive(Debug, Clone, Serialize)]
pub struct DiversityScores {
    /// Distinct tokens / total token occurrences, in [0, 1]
    pub unique_words_ratio: f64,
    /// Mean pairwise Jaccard distance, in [0, 1]
    pub avg_jaccard_distance: f64,
    /// Topic count (post outlier-exclusion)
    pub n_topics: usize,
}

/// Score a topic set.
///
/// Zero or one topics is degenerate-but-valid: no pairwise comparison is
/// possible, so both ratios are 0.0.
pub fn score(topics: &TopicSet) -> DiversityScores {
    let n_topics = topics.n_topics();
    if n_topics < 2 {
        return DiversityScores {
            unique_words_ratio: 0.0,
            avg_jaccard_distance: 0.0,
            n_topics,
        };
    }

    let total: usize = topics.topics.iter().map(Vec::len).sum();
    let distinct: HashSet<&str> = topics
        .topics
        .iter()
        .flatten()
        .map(String::as_str)
        .collect();
    let unique_words_ratio = if total > 0 {
        distinct.len() as f64 / total as f64
    } else {
        0.0
    };

    let token_sets: Vec<HashSet<&str>> = topics
        .topics
        .iter()
        .map(|t| t.iter().map(String::as_str).collect())
        .collect();

    let mut distances = Vec::new();
    for i in 0..token_sets.len() {
        for j in (i + 1)..token_sets.len() {
            distances.push(jaccard_distance(&token_sets[i], &token_sets[j]));
        }
    }
    let avg_jaccard_distance = distances.iter().sum::<f64>() / distances.len() as f64;

    DiversityScores {
        unique_words_ratio,
        avg_jaccard_distance,
        n_topics,
    }
}

/// Jaccard distance between two token sets: 1 - |intersection| / |union|.
/// An empty union counts as zero similarity.
pub fn jaccard_distance(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    let union = a.union(b).count();
    let similarity = if union > 0 {
        a.intersection(b).count() as f64 / union as f64
    } else {
        0.0
    };
    1.0 - similarity
}
