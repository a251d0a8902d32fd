// End-to-end composition tests over on-disk fixtures.
//
// Builds a small corpus CSV, a topic table CSV, and a topic model JSON in a
// temp directory, then runs the real loaders and scorers against them and
// reads the written result tables back.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tempfile::tempdir;

use tmeval::config::Config;
use tmeval::corpus::{Corpus, Subgroup};
use tmeval::output::csv as csv_out;
use tmeval::pipeline::{self, TopicSourceKind};
use tmeval::report::{EvaluationRecord, EvaluationSummary};
use tmeval::scoring::{coherence, diversity};
use tmeval::topics::model::ModelTopicSource;
use tmeval::topics::table::TableTopicSource;
use tmeval::topics::traits::TopicSource;

fn write_corpus(path: &Path) {
    // Two female rows (SEX=2), two male rows (SEX=1); d2 cells are JSON
    // token arrays, as exported by the preprocessing pipeline
    let csv = concat!(
        "id,SEX,d2\n",
        "1,2,\"[\"\"401\"\", \"\"585\"\", \"\"250\"\"]\"\n",
        "2,2,\"[\"\"401\"\", \"\"585\"\"]\"\n",
        "3,1,\"[\"\"276\"\", \"\"300\"\"]\"\n",
        "4,1,\"[\"\"276\"\", \"\"300\"\", \"\"428\"\"]\"\n",
    );
    fs::write(path, csv).unwrap();
}

fn write_topic_table(path: &Path) {
    let csv = concat!(
        "Topic,Count,Name,Representation\n",
        "-1,50,outlier,\"['999', '998']\"\n",
        "0,30,t0,\"['401', '585']\"\n",
        "1,20,t1,\"['250', '272']\"\n",
    );
    fs::write(path, csv).unwrap();
}

fn write_topic_model(path: &Path) {
    let json = r#"{
        "topics": [
            {"id": -1, "size": 50, "words": [["999", 0.9], ["998", 0.8]]},
            {"id": 0, "size": 30, "words": [["401", 0.9], ["585", 0.8]]},
            {"id": 1, "size": 20, "words": [["250", 0.9], ["272", 0.8]]}
        ]
    }"#;
    fs::write(path, json).unwrap();
}

#[test]
fn corpus_loads_and_splits_subgroups() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.csv");
    write_corpus(&path);

    let corpus = Corpus::load(&path, "d2", "SEX").unwrap();
    assert_eq!(corpus.len(), 4);

    let female = corpus.documents_for(Subgroup::Female);
    assert_eq!(female, vec!["401 585 250", "401 585"]);

    let male = corpus.documents_for(Subgroup::Male);
    assert_eq!(male, vec!["276 300", "276 300 428"]);
}

#[test]
fn corpus_missing_document_column_is_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.csv");
    fs::write(&path, "id,SEX,notes\n1,2,hello\n").unwrap();

    let err = Corpus::load(&path, "d2", "SEX").unwrap_err();
    assert!(err.to_string().contains("d2"), "unexpected error: {err}");
}

#[test]
fn corpus_missing_group_column_uses_all_documents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.csv");
    fs::write(&path, "id,d2\n1,\"a b\"\n2,\"c d\"\n").unwrap();

    let corpus = Corpus::load(&path, "d2", "SEX").unwrap();
    assert_eq!(corpus.documents_for(Subgroup::Female).len(), 2);
    assert_eq!(corpus.documents_for(Subgroup::Male).len(), 2);
}

#[test]
fn on_disk_modalities_extract_identical_topic_sets() {
    let dir = tempdir().unwrap();
    let table_path = dir.path().join("topics_info.csv");
    let model_path = dir.path().join("topic_model.json");
    write_topic_table(&table_path);
    write_topic_model(&model_path);

    let from_table = TableTopicSource::load(&table_path)
        .unwrap()
        .extract(10)
        .unwrap();
    let from_model = ModelTopicSource::load(&model_path)
        .unwrap()
        .extract(10)
        .unwrap();

    assert_eq!(from_table.topics, from_model.topics);
    assert_eq!(from_table.n_topics(), 2);
    assert_eq!(from_table.topics[0], vec!["401", "585"]);
}

#[test]
fn full_subgroup_evaluation_produces_readable_csv() {
    let dir = tempdir().unwrap();
    let corpus_path = dir.path().join("corpus.csv");
    let table_path = dir.path().join("topics_info.csv");
    write_corpus(&corpus_path);
    write_topic_table(&table_path);

    let corpus = Corpus::load(&corpus_path, "d2", "SEX").unwrap();
    let topics = TableTopicSource::load(&table_path)
        .unwrap()
        .extract(10)
        .unwrap();

    let documents = corpus.documents_for(Subgroup::Female);
    let coherence_scores = coherence::score(&topics, &documents);
    let diversity_scores = diversity::score(&topics);
    let record = EvaluationRecord::merge(Subgroup::Female, &coherence_scores, &diversity_scores);

    assert_eq!(record.model, "BERTopic_Female");
    assert_eq!(record.n_topics, 2);
    // Topics are token-disjoint in the fixture
    assert!((record.unique_words_ratio - 1.0).abs() < 1e-9);
    assert!((record.avg_jaccard_distance - 1.0).abs() < 1e-9);

    // Write through a nested results dir that doesn't exist yet
    let out_path = dir.path().join("results").join("coherence_female.csv");
    csv_out::write_record(&out_path, &record).unwrap();

    let mut reader = csv::Reader::from_path(&out_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    let expected = [
        "model",
        "c_v",
        "c_uci",
        "c_npmi",
        "unique_words_ratio",
        "avg_jaccard_distance",
        "n_topics",
    ];
    assert_eq!(headers.iter().collect::<Vec<_>>(), expected);

    let rows: Vec<HashMap<String, String>> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["model"], "BERTopic_Female");
    assert_eq!(rows[0]["n_topics"], "2");
}

/// A config rooted in a fixture directory, mirroring the default layout.
fn fixture_config(dir: &Path) -> Config {
    Config {
        data_dir: dir.to_path_buf(),
        corpus_path: dir.join("corpus.csv"),
        results_dir: dir.join("results").join("evaluation"),
        doc_column: "d2".to_string(),
        group_column: "SEX".to_string(),
    }
}

#[test]
fn missing_subgroup_artifact_is_skipped_and_summary_withheld() {
    let dir = tempdir().unwrap();
    write_corpus(&dir.path().join("corpus.csv"));
    let models = dir.path().join("models");
    fs::create_dir_all(&models).unwrap();
    // Only the female table exists on disk
    write_topic_table(&models.join("topics_info_female.csv"));

    let config = fixture_config(dir.path());
    let summary = pipeline::run(&config, TopicSourceKind::Table, 10).unwrap();
    assert!(summary.is_none());

    assert!(config.results_dir.join("coherence_female.csv").exists());
    assert!(!config.results_dir.join("coherence_male.csv").exists());
    assert!(!config
        .results_dir
        .join("model_evaluation_summary.csv")
        .exists());
}

#[test]
fn full_run_with_both_artifacts_writes_summary() {
    let dir = tempdir().unwrap();
    write_corpus(&dir.path().join("corpus.csv"));
    let models = dir.path().join("models");
    fs::create_dir_all(&models).unwrap();
    write_topic_table(&models.join("topics_info_female.csv"));
    write_topic_table(&models.join("topics_info_male.csv"));

    let config = fixture_config(dir.path());
    let summary = pipeline::run(&config, TopicSourceKind::Table, 10)
        .unwrap()
        .expect("both subgroups evaluated");

    assert_eq!(summary.len(), 2);
    assert_eq!(summary.records[0].model, "BERTopic_Female");
    assert_eq!(summary.records[1].model, "BERTopic_Male");
    assert!(config.results_dir.join("coherence_female.csv").exists());
    assert!(config.results_dir.join("coherence_male.csv").exists());
    assert!(config
        .results_dir
        .join("model_evaluation_summary.csv")
        .exists());
}

#[test]
fn summary_concatenates_records_in_evaluation_order() {
    let dir = tempdir().unwrap();

    let zero = coherence::CoherenceScores::zero();
    let female = EvaluationRecord::merge(
        Subgroup::Female,
        &zero,
        &diversity::score(&tmeval::topics::set::TopicSet::empty()),
    );
    let male = EvaluationRecord::merge(
        Subgroup::Male,
        &zero,
        &diversity::score(&tmeval::topics::set::TopicSet::empty()),
    );
    let summary = EvaluationSummary::new(vec![female, male]);

    let out_path = dir.path().join("model_evaluation_summary.csv");
    csv_out::write_summary(&out_path, &summary).unwrap();

    let mut reader = csv::Reader::from_path(&out_path).unwrap();
    let models: Vec<String> = reader
        .records()
        .map(|r| r.unwrap().get(0).unwrap().to_string())
        .collect();
    assert_eq!(models, vec!["BERTopic_Female", "BERTopic_Male"]);
}
