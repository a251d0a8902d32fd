// CSV writers for the per-subgroup result tables and the combined summary.
//
// One row per subgroup run, columns: model, c_v, c_uci, c_npmi,
// unique_words_ratio, avg_jaccard_distance, n_topics.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};

use crate::report::{EvaluationRecord, EvaluationSummary};

/// Write a single subgroup's record as a one-row table.
pub fn write_record(path: &Path, record: &EvaluationRecord) -> Result<()> {
    let mut writer = open_writer(path)?;
    writer.serialize(record)?;
    writer.flush()?;
    Ok(())
}

/// Write the combined summary, one row per subgroup in evaluation order.
pub fn write_summary(path: &Path, summary: &EvaluationSummary) -> Result<()> {
    let mut writer = open_writer(path)?;
    for record in &summary.records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn open_writer(path: &Path) -> Result<csv::Writer<File>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create results directory: {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create result file: {}", path.display()))?;
    Ok(csv::Writer::from_writer(file))
}
