// Metric computation — coherence against a reference corpus, diversity from
// pairwise topic overlap.

pub mod coherence;
pub mod diversity;
pub mod windows;
