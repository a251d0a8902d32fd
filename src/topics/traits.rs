// Topic source trait — swap-ready abstraction.
//
// The two input artifacts (a serialized model and an exported topic table)
// expose topics differently but must produce identical TopicSets. The caller
// picks the implementation based on which artifact is available; everything
// downstream is source-agnostic.

use anyhow::Result;

use super::set::TopicSet;

/// Reserved topic id for unclustered documents. Always excluded from scoring.
pub const OUTLIER_TOPIC_ID: i64 = -1;

/// Trait for extracting a normalized topic set from a topic-model artifact.
pub trait TopicSource {
    /// Produce the topic set, keeping at most `top_n` tokens per topic.
    fn extract(&self, top_n: usize) -> Result<TopicSet>;
}
