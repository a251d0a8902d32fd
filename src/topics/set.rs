// TopicSet — the normalized output of topic extraction.
//
// An ordered list of topics, each an ordered list of tokens in descending
// relevance order, truncated to the configured cap. The outlier topic is
// already excluded by the time a TopicSet exists.

use colored::Colorize;
use serde::{Deserialize, Serialize};

/// The topics extracted for one subgroup model, outlier excluded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicSet {
    /// Topic token lists in the source's native order (descending topic size
    /// as assigned upstream). Tokens are never re-sorted.
    pub topics: Vec<Vec<String>>,
}

impl TopicSet {
    pub fn new(topics: Vec<Vec<String>>) -> Self {
        Self { topics }
    }

    pub fn empty() -> Self {
        Self { topics: Vec::new() }
    }

    /// Number of topics (post outlier-exclusion).
    pub fn n_topics(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Display the topic set as a numbered list in the terminal.
    ///
    /// This is what the `topics` subcommand prints — a quick way to check
    /// that extraction reads the artifact correctly before scoring.
    pub fn display(&self, source_label: &str) {
        println!(
            "\n{}",
            format!(
                "=== {} topics from {} (outlier excluded) ===",
                self.n_topics(),
                source_label
            )
            .bold()
        );
        println!();

        if self.is_empty() {
            println!("  {}", "No usable topics found.".yellow());
            return;
        }

        for (i, topic) in self.topics.iter().enumerate() {
            println!("  {:>3}. {}", i + 1, topic.join(", ").dimmed());
        }
        println!();
    }
}
