// Colored terminal output for evaluation results.
//
// The numeric results are always printed before being persisted, so a run
// is useful even when the CSV write fails or the summary is skipped.

use colored::Colorize;

use crate::report::{EvaluationRecord, EvaluationSummary};

/// Display one subgroup's full result block.
pub fn display_record(record: &EvaluationRecord) {
    println!("\n{}", format!("Results for {}:", record.model).bold());
    println!("  C_v coherence:        {:.4}", record.c_v);
    println!("  C_uci coherence:      {:.4}", record.c_uci);
    println!("  C_npmi coherence:     {:.4}", record.c_npmi);
    println!("  Unique words ratio:   {:.4}", record.unique_words_ratio);
    println!("  Avg Jaccard distance: {:.4}", record.avg_jaccard_distance);
    println!("  Number of topics:     {}", record.n_topics);
}

/// Display the combined summary as a compact table.
pub fn display_summary(summary: &EvaluationSummary) {
    if summary.is_empty() {
        return;
    }

    println!(
        "\n{}",
        format!("=== Evaluation Summary ({} models) ===", summary.len()).bold()
    );
    println!();
    println!(
        "  {:<18} {:>8} {:>8} {:>8} {:>8} {:>9} {:>8}",
        "Model".dimmed(),
        "c_v".dimmed(),
        "c_uci".dimmed(),
        "c_npmi".dimmed(),
        "unique".dimmed(),
        "jaccard".dimmed(),
        "topics".dimmed(),
    );
    println!("  {}", "-".repeat(74).dimmed());
    for record in &summary.records {
        println!(
            "  {:<18} {:>8.4} {:>8.4} {:>8.4} {:>8.4} {:>9.4} {:>8}",
            record.model,
            record.c_v,
            record.c_uci,
            record.c_npmi,
            record.unique_words_ratio,
            record.avg_jaccard_distance,
            record.n_topics,
        );
    }
    println!();
}
