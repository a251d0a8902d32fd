// tmeval: coherence and diversity evaluation for per-subgroup topic models.
//
// This is the library root. Each module corresponds to one stage of the
// evaluation pipeline: corpus loading, topic extraction, metric scoring,
// and result reporting.

pub mod config;
pub mod corpus;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod status;
pub mod topics;
