// System status display — shows which input artifacts and result tables
// exist for the configured data directory.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::corpus::Subgroup;

/// Display input/output artifact status to the terminal.
pub fn show(config: &Config) -> Result<()> {
    println!("Data directory: {}", config.data_dir.display());
    println!();

    println!("{}", "Inputs".bold());
    describe("corpus", &config.corpus_path);
    for subgroup in Subgroup::ALL {
        describe(
            &format!("{subgroup} model"),
            &config.model_path(subgroup),
        );
        describe(
            &format!("{subgroup} topic table"),
            &config.table_path(subgroup),
        );
    }

    println!("\n{}", "Results".bold());
    for subgroup in Subgroup::ALL {
        let path = config
            .results_dir
            .join(format!("coherence_{}.csv", subgroup.slug()));
        describe(&format!("{subgroup} results"), &path);
    }
    describe(
        "combined summary",
        &config.results_dir.join("model_evaluation_summary.csv"),
    );

    if !config.corpus_path.exists() {
        println!(
            "\nNo corpus found. Set TMEVAL_CORPUS_PATH (or TMEVAL_DATA_DIR) in your .env file."
        );
    }

    Ok(())
}

fn describe(label: &str, path: &Path) {
    match std::fs::metadata(path) {
        Ok(meta) => println!(
            "  {} {:<22} {} ({})",
            "✓".green(),
            label,
            path.display(),
            format_bytes(meta.len())
        ),
        Err(_) => println!(
            "  {} {:<22} {}",
            "-".dimmed(),
            label,
            format!("{} (missing)", path.display()).dimmed()
        ),
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
