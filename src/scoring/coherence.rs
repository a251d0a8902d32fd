// Coherence scoring — c_v, c_uci, and c_npmi against a reference corpus.
//
// All three measures share one probability-estimation pass: boolean sliding
// windows over the tokenized corpus (size 10 for the pairwise measures,
// size 110 for c_v), restricted to the topic words under evaluation.
//
//   c_uci:  mean PMI over all within-topic word pairs
//   c_npmi: mean normalized PMI over the same pairs
//   c_v:    mean cosine similarity between NPMI context vectors, one
//           segment per topic word (word vs. the full topic set)
//
// Each measure runs behind an independent guard: a failure is logged and
// recorded as 0.0 without disturbing the other two.

use std::collections::HashSet;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::corpus::dictionary::Dictionary;
use crate::topics::set::TopicSet;

use super::windows::{pair_key, WindowStats};

/// Smoothing term matching the reference implementation of these measures.
pub const EPSILON: f64 = 1e-12;

/// Sliding-window size for the pairwise measures (c_uci, c_npmi).
const PAIR_WINDOW_SIZE: usize = 10;
/// Sliding-window size for c_v.
const SET_WINDOW_SIZE: usize = 110;

/// One coherence score per measure; a failed measure is recorded as 0.0.
#[derive(Debug, Clone, Serialize)]
pub struct CoherenceScores {
    pub c_v: f64,
    pub c_uci: f64,
    pub c_npmi: f64,
}

impl CoherenceScores {
    pub fn zero() -> Self {
        Self {
            c_v: 0.0,
            c_uci: 0.0,
            c_npmi: 0.0,
        }
    }
}

/// Score a topic set against a corpus of whitespace-joined documents.
///
/// An empty topic set short-circuits to zeros without touching the corpus.
pub fn score(topics: &TopicSet, documents: &[String]) -> CoherenceScores {
    if topics.is_empty() {
        warn!("No valid topics found; coherence defaults to zero");
        return CoherenceScores::zero();
    }

    let texts: Vec<Vec<String>> = documents
        .iter()
        .map(|doc| doc.split_whitespace().map(str::to_string).collect())
        .collect();

    let dictionary = Dictionary::from_texts(&texts);
    info!(
        vocabulary = dictionary.len(),
        documents = dictionary.num_docs(),
        "Dictionary built"
    );

    let topic_ids = resolve_topic_ids(topics, &dictionary);

    // One slot per token position; only topic words carry an id
    let relevant: HashSet<u32> = topic_ids.iter().flatten().copied().collect();
    let slotted: Vec<Vec<Option<u32>>> = texts
        .iter()
        .map(|text| {
            text.iter()
                .map(|token| dictionary.id_of(token).filter(|id| relevant.contains(id)))
                .collect()
        })
        .collect();

    let pairs = within_topic_pairs(&topic_ids);
    let pair_stats = count_windows(&slotted, &pairs, PAIR_WINDOW_SIZE);
    let set_stats = count_windows(&slotted, &pairs, SET_WINDOW_SIZE);

    CoherenceScores {
        c_v: guarded("c_v", || c_v(&topic_ids, &set_stats)),
        c_uci: guarded("c_uci", || pairwise_mean(&topic_ids, &pair_stats, pmi)),
        c_npmi: guarded("c_npmi", || pairwise_mean(&topic_ids, &pair_stats, npmi)),
    }
}

/// Map topic tokens to dictionary ids, deduplicating within a topic and
/// dropping out-of-vocabulary tokens with a warning. A topic that loses all
/// its tokens stays in the list as an empty entry so the measures can reject
/// it explicitly.
fn resolve_topic_ids(topics: &TopicSet, dictionary: &Dictionary) -> Vec<Vec<u32>> {
    let mut dropped = 0usize;
    let topic_ids: Vec<Vec<u32>> = topics
        .topics
        .iter()
        .map(|topic| {
            let mut seen = HashSet::new();
            let mut ids = Vec::new();
            for token in topic {
                match dictionary.id_of(token) {
                    Some(id) => {
                        if seen.insert(id) {
                            ids.push(id);
                        }
                    }
                    None => dropped += 1,
                }
            }
            ids
        })
        .collect();

    if dropped > 0 {
        warn!(
            dropped,
            "Topic tokens absent from the corpus vocabulary were dropped"
        );
    }

    // A topic word seen in a single document yields unstable window
    // statistics; surface it when chasing a surprising score.
    for &id in topic_ids.iter().flatten() {
        if dictionary.doc_freq(id) <= 1 {
            debug!(
                token = dictionary.token_of(id).unwrap_or("?"),
                "Topic word appears in only one document"
            );
        }
    }

    topic_ids
}

/// All normalized within-topic word-id pairs worth counting.
fn within_topic_pairs(topic_ids: &[Vec<u32>]) -> HashSet<(u32, u32)> {
    let mut pairs = HashSet::new();
    for ids in topic_ids {
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                pairs.insert(pair_key(a, b));
            }
        }
    }
    pairs
}

/// One boolean-sliding-window pass over the corpus.
fn count_windows(
    slotted: &[Vec<Option<u32>>],
    pairs: &HashSet<(u32, u32)>,
    window_size: usize,
) -> WindowStats {
    let pb = ProgressBar::new(slotted.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Windows [{bar:30}] {pos}/{len} ({eta})")
            .unwrap(),
    );

    let mut stats = WindowStats::new(window_size);
    for doc in slotted {
        stats.add_document(doc, pairs);
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        window_size,
        windows = stats.num_windows(),
        "Window statistics counted"
    );
    stats
}

/// Run one measure, defaulting to 0.0 on failure.
///
/// The three measures are independent fallible operations — one failing must
/// not stop the others from being attempted.
fn guarded(name: &str, measure: impl FnOnce() -> anyhow::Result<f64>) -> f64 {
    match measure() {
        Ok(value) => value,
        Err(e) => {
            warn!(measure = name, error = %e, "Coherence measure failed; recording 0.0");
            0.0
        }
    }
}

/// PMI(a, b) = ln((P(ab) + eps) / (P(a) * P(b)))
fn pmi(stats: &WindowStats, a: u32, b: u32) -> f64 {
    let joint = stats.joint_probability(a, b) + EPSILON;
    (joint / (stats.probability(a) * stats.probability(b))).ln()
}

/// NPMI(a, b) = PMI(a, b) / -ln(P(ab) + eps)
///
/// A pair present in every window has P(ab) = 1, where the smoothing term
/// pushes the normalizer slightly negative. The measure saturates at its
/// supremum of 1.0 there instead of flipping sign.
fn npmi(stats: &WindowStats, a: u32, b: u32) -> f64 {
    let joint = stats.joint_probability(a, b) + EPSILON;
    let normalizer = -joint.ln();
    if normalizer <= 0.0 {
        return 1.0;
    }
    pmi(stats, a, b) / normalizer
}

/// Mean of a pairwise confirmation over all within-topic word pairs.
///
/// PMI and NPMI are symmetric, so each unordered pair is computed once; the
/// mean is identical to the ordered-pair formulation.
fn pairwise_mean(
    topic_ids: &[Vec<u32>],
    stats: &WindowStats,
    confirm: fn(&WindowStats, u32, u32) -> f64,
) -> anyhow::Result<f64> {
    anyhow::ensure!(stats.num_windows() > 0, "corpus produced no windows");

    let mut values = Vec::new();
    for ids in topic_ids {
        anyhow::ensure!(
            !ids.is_empty(),
            "a topic has no tokens in the corpus vocabulary"
        );
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                values.push(confirm(stats, a, b));
            }
        }
    }

    anyhow::ensure!(!values.is_empty(), "no word pairs to score");
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// c_v: one segment per topic word, confirmed by the cosine similarity
/// between its NPMI context vector and the topic set's summed vector.
fn c_v(topic_ids: &[Vec<u32>], stats: &WindowStats) -> anyhow::Result<f64> {
    anyhow::ensure!(stats.num_windows() > 0, "corpus produced no windows");

    let mut segments = Vec::new();
    for ids in topic_ids {
        anyhow::ensure!(
            !ids.is_empty(),
            "a topic has no tokens in the corpus vocabulary"
        );

        // v_j = sum over the whole topic of NPMI(w, w_j)
        let set_vector: Vec<f64> = ids
            .iter()
            .map(|&j| ids.iter().map(|&w| npmi(stats, w, j)).sum())
            .collect();

        for &word in ids {
            let word_vector: Vec<f64> = ids.iter().map(|&j| npmi(stats, word, j)).collect();
            segments.push(cosine(&word_vector, &set_vector));
        }
    }

    anyhow::ensure!(!segments.is_empty(), "no segments to score");
    Ok(segments.iter().sum::<f64>() / segments.len() as f64)
}

/// Cosine similarity; 0.0 when either vector has (near-)zero magnitude.
fn cosine(u: &[f64], v: &[f64]) -> f64 {
    let dot: f64 = u.iter().zip(v).map(|(a, b)| a * b).sum();
    let mag = u.iter().map(|a| a * a).sum::<f64>().sqrt() * v.iter().map(|b| b * b).sum::<f64>().sqrt();
    if mag < f64::EPSILON {
        0.0
    } else {
        dot / mag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(topics: &[&[&str]]) -> TopicSet {
        TopicSet::new(
            topics
                .iter()
                .map(|t| t.iter().map(|w| w.to_string()).collect())
                .collect(),
        )
    }

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_empty_topic_set_is_exactly_zero() {
        let scores = score(&TopicSet::empty(), &docs(&["a b c"]));
        assert_eq!(scores.c_v, 0.0);
        assert_eq!(scores.c_uci, 0.0);
        assert_eq!(scores.c_npmi, 0.0);
    }

    #[test]
    fn test_empty_corpus_defaults_to_zero() {
        // Topics exist but there are no documents — every measure fails
        // independently and is recorded as 0.0
        let scores = score(&set(&[&["a", "b"]]), &[]);
        assert_eq!(scores.c_v, 0.0);
        assert_eq!(scores.c_uci, 0.0);
        assert_eq!(scores.c_npmi, 0.0);
    }

    #[test]
    fn test_cooccurring_pair_beats_disjoint_pair() {
        // "a b" always co-occur; "a" and "z" never share a document
        let corpus = docs(&["a b", "a b", "a b x", "z y", "z y", "z q"]);
        let together = score(&set(&[&["a", "b"]]), &corpus);
        let apart = score(&set(&[&["a", "z"]]), &corpus);
        assert!(
            together.c_npmi > apart.c_npmi,
            "co-occurring pair should score higher: {} vs {}",
            together.c_npmi,
            apart.c_npmi
        );
        assert!(together.c_uci > apart.c_uci);
        assert!(together.c_v > apart.c_v);
    }

    #[test]
    fn test_perfect_cooccurrence_npmi_close_to_one() {
        let corpus = docs(&["a b", "a b", "a b", "c", "c", "d", "d", "e"]);
        let scores = score(&set(&[&["a", "b"]]), &corpus);
        assert!(
            scores.c_npmi > 0.9,
            "always-together pair should approach 1.0, got {}",
            scores.c_npmi
        );
    }

    #[test]
    fn test_out_of_vocabulary_topic_fails_softly() {
        // Neither token occurs in the corpus — measures fail, recorded as 0.0
        let scores = score(&set(&[&["nope", "missing"]]), &docs(&["a b c"]));
        assert_eq!(scores.c_v, 0.0);
        assert_eq!(scores.c_uci, 0.0);
        assert_eq!(scores.c_npmi, 0.0);
    }

    #[test]
    fn test_guard_isolates_failures() {
        let ok = guarded("ok", || Ok(0.5));
        assert_eq!(ok, 0.5);
        let failed = guarded("failing", || anyhow::bail!("boom"));
        assert_eq!(failed, 0.0);
    }

    #[test]
    fn test_cosine_identical_vectors() {
        assert!((cosine(&[1.0, 2.0], &[1.0, 2.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_zero_vector() {
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }
}
