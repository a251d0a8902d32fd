// Serialized-model modality: topics read from a JSON model export.
//
// The model file carries, per topic, an id, a document count, and the ranked
// (token, weight) list. Extraction drops the weights, skips the outlier
// topic, and truncates to the configured cap.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use super::set::TopicSet;
use super::traits::{TopicSource, OUTLIER_TOPIC_ID};

/// A serialized topic model loaded into memory.
#[derive(Debug, Deserialize)]
pub struct TopicModel {
    pub topics: Vec<ModelTopic>,
}

/// One topic as stored in the model file.
#[derive(Debug, Deserialize)]
pub struct ModelTopic {
    /// Topic id; -1 marks the outlier topic
    pub id: i64,
    /// Number of documents assigned to this topic
    #[serde(default)]
    pub size: u64,
    /// Ranked (token, weight) pairs, highest relevance first
    pub words: Vec<(String, f64)>,
}

/// Topic source backed by an in-memory model.
pub struct ModelTopicSource {
    model: TopicModel,
}

impl ModelTopicSource {
    pub fn new(model: TopicModel) -> Self {
        Self { model }
    }

    /// Load a model export from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open topic model: {}", path.display()))?;
        let model: TopicModel = serde_json::from_reader(file)
            .with_context(|| format!("Failed to parse topic model: {}", path.display()))?;
        info!(topics = model.topics.len(), path = %path.display(), "Topic model loaded");
        Ok(Self::new(model))
    }
}

impl TopicSource for ModelTopicSource {
    fn extract(&self, top_n: usize) -> Result<TopicSet> {
        anyhow::ensure!(top_n >= 1, "top_n must be at least 1, got {top_n}");

        let mut topics = Vec::new();
        for topic in &self.model.topics {
            if topic.id == OUTLIER_TOPIC_ID {
                continue;
            }
            let tokens: Vec<String> = topic
                .words
                .iter()
                .take(top_n)
                .map(|(token, _weight)| token.clone())
                .collect();
            if !tokens.is_empty() {
                topics.push(tokens);
            }
        }

        Ok(TopicSet::new(topics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(id: i64, words: &[&str]) -> ModelTopic {
        ModelTopic {
            id,
            size: 10,
            words: words.iter().map(|w| (w.to_string(), 0.5)).collect(),
        }
    }

    #[test]
    fn test_outlier_skipped_and_order_preserved() {
        let source = ModelTopicSource::new(TopicModel {
            topics: vec![
                topic(-1, &["noise"]),
                topic(0, &["a", "b", "c"]),
                topic(1, &["d", "e"]),
            ],
        });
        let set = source.extract(10).unwrap();
        assert_eq!(set.n_topics(), 2);
        assert_eq!(set.topics[0], vec!["a", "b", "c"]);
        assert_eq!(set.topics[1], vec!["d", "e"]);
    }

    #[test]
    fn test_truncates_to_cap() {
        let source = ModelTopicSource::new(TopicModel {
            topics: vec![topic(0, &["a", "b", "c", "d", "e"])],
        });
        let set = source.extract(2).unwrap();
        assert_eq!(set.topics[0], vec!["a", "b"]);
    }

    #[test]
    fn test_empty_topic_omitted() {
        let source = ModelTopicSource::new(TopicModel {
            topics: vec![topic(0, &[]), topic(1, &["a"])],
        });
        let set = source.extract(10).unwrap();
        assert_eq!(set.n_topics(), 1);
        assert_eq!(set.topics[0], vec!["a"]);
    }

    #[test]
    fn test_zero_cap_rejected() {
        let source = ModelTopicSource::new(TopicModel { topics: vec![] });
        assert!(source.extract(0).is_err());
    }
}
