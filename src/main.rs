use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use tmeval::config::Config;
use tmeval::corpus::Subgroup;
use tmeval::pipeline::{self, TopicSourceKind};

/// tmeval: coherence and diversity evaluation for per-subgroup topic models.
///
/// Extracts topic-word lists from a serialized model or an exported topic
/// table, scores them against a reference corpus, and writes per-subgroup
/// and combined CSV result tables.
#[derive(Parser)]
#[command(name = "tmeval", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which topic-model artifact to read topics from.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceKind {
    /// Serialized topic model (JSON)
    Model,
    /// Exported topic table (CSV with Topic/Representation columns)
    Table,
}

impl From<SourceKind> for TopicSourceKind {
    fn from(arg: SourceKind) -> Self {
        match arg {
            SourceKind::Model => TopicSourceKind::Model,
            SourceKind::Table => TopicSourceKind::Table,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SubgroupArg {
    Female,
    Male,
}

impl From<SubgroupArg> for Subgroup {
    fn from(arg: SubgroupArg) -> Self {
        match arg {
            SubgroupArg::Female => Subgroup::Female,
            SubgroupArg::Male => Subgroup::Male,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate both subgroup models and write result tables
    Evaluate {
        /// Topic source to read from
        #[arg(long, value_enum, default_value = "table")]
        source: SourceKind,

        /// Number of top words to keep per topic
        #[arg(long, default_value = "10")]
        top_n_words: usize,
    },

    /// Extract and display one subgroup's topics without scoring
    Topics {
        /// Topic source to read from
        #[arg(long, value_enum, default_value = "table")]
        source: SourceKind,

        /// Which subgroup's artifact to read
        #[arg(long, value_enum)]
        subgroup: SubgroupArg,

        /// Number of top words to keep per topic
        #[arg(long, default_value = "10")]
        top_n_words: usize,
    },

    /// Show which input artifacts and result tables exist
    Status,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tmeval=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            source,
            top_n_words,
        } => {
            let config = Config::load()?;
            if pipeline::run(&config, source.into(), top_n_words)?.is_none() {
                println!(
                    "\n{}",
                    "Summary skipped — not every subgroup was evaluated.".yellow()
                );
            }
            println!("\n{}", "Evaluation complete.".bold());
        }

        Commands::Topics {
            source,
            subgroup,
            top_n_words,
        } => {
            let config = Config::load()?;
            let kind = TopicSourceKind::from(source);
            let path = kind.path(&config, Subgroup::from(subgroup));
            if !path.exists() {
                anyhow::bail!("Topic source not found: {}", path.display());
            }
            let topics = kind.open(&path)?.extract(top_n_words)?;
            topics.display(&path.display().to_string());
        }

        Commands::Status => {
            let config = Config::load()?;
            tmeval::status::show(&config)?;
        }
    }

    Ok(())
}
