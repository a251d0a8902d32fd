// Serialized-table modality: topics recovered from an exported topic table.
//
// The table is a CSV with at least `Topic` (integer id) and `Representation`
// columns. `Representation` holds a stringified list of tokens — either
// plain ("['218', '220']") or (token, weight) tuples — as written by the
// upstream export. Cells go through a strict list-literal parse first and a
// permissive strip/split fallback when that fails, so a half-written cell
// still yields usable tokens.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::set::TopicSet;
use super::traits::{TopicSource, OUTLIER_TOPIC_ID};

/// One row of the exported topic table.
#[derive(Debug, Clone)]
pub struct TableRow {
    pub topic_id: i64,
    pub representation: String,
}

/// Topic source backed by an exported topic table.
pub struct TableTopicSource {
    rows: Vec<TableRow>,
}

impl TableTopicSource {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }

    /// Load a topic table from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open topic table: {}", path.display()))?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader
            .headers()
            .context("Failed to read topic table headers")?
            .clone();
        let topic_idx = headers
            .iter()
            .position(|h| h == "Topic")
            .context("Topic table is missing the 'Topic' column")?;
        let rep_idx = headers
            .iter()
            .position(|h| h == "Representation")
            .context("Topic table is missing the 'Representation' column")?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.context("Failed to parse topic table record")?;
            let topic_cell = record.get(topic_idx).unwrap_or_default().trim();
            let topic_id: i64 = topic_cell
                .parse()
                .with_context(|| format!("Non-integer 'Topic' value: '{topic_cell}'"))?;
            rows.push(TableRow {
                topic_id,
                representation: record.get(rep_idx).unwrap_or_default().to_string(),
            });
        }

        info!(rows = rows.len(), path = %path.display(), "Topic table loaded");
        Ok(Self::new(rows))
    }
}

impl TopicSource for TableTopicSource {
    fn extract(&self, top_n: usize) -> Result<TopicSet> {
        anyhow::ensure!(top_n >= 1, "top_n must be at least 1, got {top_n}");

        let mut topics = Vec::new();
        for row in &self.rows {
            if row.topic_id == OUTLIER_TOPIC_ID {
                continue;
            }
            let tokens = parse_representation(&row.representation, top_n);
            if !tokens.is_empty() {
                topics.push(tokens);
            }
        }

        Ok(TopicSet::new(topics))
    }
}

/// Recover up to `top_n` tokens from a stringified token list.
///
/// Strict parsing of the cell as a bracketed list literal is attempted
/// first; items that are themselves sequences contribute their first
/// element (the token, dropping the weight). On parse failure the cell is
/// stripped of bracket/quote characters and split on commas.
pub fn parse_representation(cell: &str, top_n: usize) -> Vec<String> {
    match parse_list_literal(cell) {
        Ok(items) => items.into_iter().take(top_n).collect(),
        Err(()) => {
            debug!(cell, "Strict representation parse failed, using fallback");
            fallback_split(cell, top_n)
        }
    }
}

/// Permissive recovery: drop bracket/quote characters, split on commas,
/// trim, discard empty fragments.
fn fallback_split(cell: &str, top_n: usize) -> Vec<String> {
    let stripped: String = cell
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '(' | ')' | '\'' | '"'))
        .collect();
    stripped
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .take(top_n)
        .collect()
}

/// Strict parse of a Python-like (or JSON) list literal.
///
/// Accepts quoted strings, bare number/word lexemes, and nested pairs in
/// `()` or `[]` (first element taken as the token). Anything malformed —
/// unclosed brackets, trailing garbage, an unterminated quote — is an error
/// so the caller can fall back.
fn parse_list_literal(cell: &str) -> Result<Vec<String>, ()> {
    let mut p = Parser {
        chars: cell.trim().chars().collect(),
        pos: 0,
    };
    p.expect('[')?;
    let items = p.items(']')?;
    p.expect(']')?;
    p.skip_ws();
    if p.pos != p.chars.len() {
        return Err(());
    }
    Ok(items)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, c: char) -> Result<(), ()> {
        self.skip_ws();
        if self.peek() == Some(c) {
            self.pos += 1;
            Ok(())
        } else {
            Err(())
        }
    }

    /// Comma-separated items up to (not consuming) the closing delimiter.
    fn items(&mut self, close: char) -> Result<Vec<String>, ()> {
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                Some(c) if c == close => return Ok(items),
                None => return Err(()),
                _ => {}
            }
            if let Some(token) = self.item()? {
                items.push(token);
            }
            self.skip_ws();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(c) if c == close => return Ok(items),
                _ => return Err(()),
            }
        }
    }

    /// One item: a quoted string, a nested sequence (first element wins),
    /// or a bare lexeme. An empty nested sequence yields no token.
    fn item(&mut self) -> Result<Option<String>, ()> {
        self.skip_ws();
        match self.peek() {
            Some(q @ ('\'' | '"')) => {
                self.pos += 1;
                let mut s = String::new();
                loop {
                    match self.peek() {
                        Some(c) if c == q => {
                            self.pos += 1;
                            return Ok(Some(s));
                        }
                        Some(c) => {
                            s.push(c);
                            self.pos += 1;
                        }
                        None => return Err(()),
                    }
                }
            }
            Some(open @ ('(' | '[')) => {
                let close = if open == '(' { ')' } else { ']' };
                self.pos += 1;
                let inner = self.items(close)?;
                self.expect(close)?;
                Ok(inner.into_iter().next())
            }
            Some(_) => {
                let mut s = String::new();
                while let Some(c) = self.peek() {
                    if c == ',' || c == ')' || c == ']' || c.is_whitespace() {
                        break;
                    }
                    s.push(c);
                    self.pos += 1;
                }
                if s.is_empty() {
                    Err(())
                } else {
                    Ok(Some(s))
                }
            }
            None => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_quoted_list() {
        assert_eq!(
            parse_representation("['218', '220', '124']", 10),
            vec!["218", "220", "124"]
        );
    }

    #[test]
    fn test_strict_truncates() {
        assert_eq!(
            parse_representation("['101', '102', '103']", 2),
            vec!["101", "102"]
        );
    }

    #[test]
    fn test_strict_tuple_list_takes_first_element() {
        assert_eq!(
            parse_representation("[('218', 0.52), ('220', 0.41)]", 10),
            vec!["218", "220"]
        );
    }

    #[test]
    fn test_strict_bare_numbers() {
        assert_eq!(parse_representation("[101, 102]", 10), vec!["101", "102"]);
    }

    #[test]
    fn test_fallback_unclosed_bracket() {
        assert_eq!(parse_representation("[101, 102", 10), vec!["101", "102"]);
    }

    #[test]
    fn test_fallback_discards_empty_fragments() {
        assert_eq!(parse_representation("[a,, b,]", 10), vec!["a", "b"]);
    }

    #[test]
    fn test_fallback_unterminated_quote() {
        assert_eq!(parse_representation("['218, '220']", 10), vec!["218", "220"]);
    }

    #[test]
    fn test_json_style_list() {
        assert_eq!(
            parse_representation(r#"["heart", "lung"]"#, 10),
            vec!["heart", "lung"]
        );
    }

    #[test]
    fn test_empty_list() {
        assert!(parse_representation("[]", 10).is_empty());
    }

    #[test]
    fn test_non_list_cell_is_single_fragment() {
        // No commas, no brackets — the whole cell survives as one token
        assert_eq!(parse_representation("plain text", 10), vec!["plain text"]);
    }

    #[test]
    fn test_extract_skips_outlier_and_empty_rows() {
        let source = TableTopicSource::new(vec![
            TableRow {
                topic_id: -1,
                representation: "['noise']".to_string(),
            },
            TableRow {
                topic_id: 0,
                representation: "['a', 'b']".to_string(),
            },
            TableRow {
                topic_id: 1,
                representation: "[]".to_string(),
            },
        ]);
        let set = source.extract(10).unwrap();
        assert_eq!(set.n_topics(), 1);
        assert_eq!(set.topics[0], vec!["a", "b"]);
    }
}
