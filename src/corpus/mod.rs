// Reference corpus loading and subgroup filtering.
//
// The corpus is a CSV with one row per document. The document column holds
// either a JSON token array (["401", "250", ...]) or a free-form string;
// token arrays are whitespace-joined so that downstream tokenization is a
// plain whitespace split either way. The membership column partitions rows
// into the two subgroups under evaluation.

pub mod dictionary;

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

/// A population subgroup evaluated with its own topic model and corpus slice.
///
/// The original data encodes membership numerically (2 = female, 1 = male);
/// textual labels are accepted as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subgroup {
    Female,
    Male,
}

impl Subgroup {
    /// Both subgroups, in evaluation order (female first).
    pub const ALL: [Subgroup; 2] = [Subgroup::Female, Subgroup::Male];

    /// Model label used in result tables.
    pub fn label(self) -> &'static str {
        match self {
            Subgroup::Female => "BERTopic_Female",
            Subgroup::Male => "BERTopic_Male",
        }
    }

    /// Lowercase identifier used in file names and CLI arguments.
    pub fn slug(self) -> &'static str {
        match self {
            Subgroup::Female => "female",
            Subgroup::Male => "male",
        }
    }

    /// Whether a raw membership cell value belongs to this subgroup.
    pub fn matches(self, value: &str) -> bool {
        let v = value.trim();
        match self {
            Subgroup::Female => v == "2" || v.eq_ignore_ascii_case("female") || v.eq_ignore_ascii_case("f"),
            Subgroup::Male => v == "1" || v.eq_ignore_ascii_case("male") || v.eq_ignore_ascii_case("m"),
        }
    }
}

impl std::fmt::Display for Subgroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// The loaded reference corpus: one joined document string per row, plus the
/// raw membership value when the membership column is present.
#[derive(Debug)]
pub struct Corpus {
    documents: Vec<String>,
    memberships: Option<Vec<String>>,
}

impl Corpus {
    /// Load the corpus CSV.
    ///
    /// A missing document column is a structural failure and aborts the run.
    /// A missing membership column is only a warning — both subgroups then
    /// score against the full corpus.
    pub fn load(path: &Path, doc_column: &str, group_column: &str) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open corpus file: {}", path.display()))?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader
            .headers()
            .context("Failed to read corpus CSV headers")?
            .clone();

        let doc_idx = headers
            .iter()
            .position(|h| h == doc_column)
            .with_context(|| {
                format!("Corpus is missing the required '{doc_column}' document column")
            })?;

        let group_idx = headers.iter().position(|h| h == group_column);
        if group_idx.is_none() {
            warn!(
                column = group_column,
                "Membership column not found; using all documents for both subgroups"
            );
        }

        let mut documents = Vec::new();
        let mut memberships = group_idx.map(|_| Vec::new());

        for record in reader.records() {
            let record = record.context("Failed to parse corpus CSV record")?;
            let cell = record.get(doc_idx).unwrap_or_default();
            documents.push(join_document(cell));
            if let (Some(values), Some(idx)) = (memberships.as_mut(), group_idx) {
                values.push(record.get(idx).unwrap_or_default().to_string());
            }
        }

        info!(
            documents = documents.len(),
            path = %path.display(),
            "Corpus loaded"
        );

        Ok(Self {
            documents,
            memberships,
        })
    }

    /// Total number of documents across all subgroups.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The subgroup's documents as whitespace-joined strings.
    ///
    /// Without a membership column this is the full corpus, matching the
    /// original fallback behavior.
    pub fn documents_for(&self, subgroup: Subgroup) -> Vec<String> {
        match &self.memberships {
            Some(values) => self
                .documents
                .iter()
                .zip(values)
                .filter(|(_, v)| subgroup.matches(v))
                .map(|(d, _)| d.clone())
                .collect(),
            None => self.documents.clone(),
        }
    }
}

/// Normalize a document cell into a single whitespace-joined string.
///
/// Cells exported from the preprocessing pipeline are JSON token arrays;
/// anything that doesn't parse as one is taken verbatim.
fn join_document(cell: &str) -> String {
    let trimmed = cell.trim();
    if trimmed.starts_with('[') {
        if let Ok(tokens) = serde_json::from_str::<Vec<String>>(trimmed) {
            return tokens.join(" ");
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_document_token_array() {
        assert_eq!(join_document(r#"["401", "250", "789"]"#), "401 250 789");
    }

    #[test]
    fn test_join_document_plain_string() {
        assert_eq!(join_document("401 250 789"), "401 250 789");
    }

    #[test]
    fn test_join_document_malformed_array_kept_verbatim() {
        // Not valid JSON — treated as free-form text
        assert_eq!(join_document("[401, 250"), "[401, 250");
    }

    #[test]
    fn test_subgroup_matching() {
        assert!(Subgroup::Female.matches("2"));
        assert!(Subgroup::Female.matches("Female"));
        assert!(Subgroup::Female.matches(" f "));
        assert!(!Subgroup::Female.matches("1"));
        assert!(Subgroup::Male.matches("1"));
        assert!(Subgroup::Male.matches("male"));
        assert!(!Subgroup::Male.matches("2"));
    }
}
