// Term dictionary over a tokenized corpus.
//
// A bidirectional token <-> integer-id mapping with document-frequency
// statistics, built once per subgroup and shared by all three coherence
// measures. Ids are assigned in first-encounter order.

use std::collections::{HashMap, HashSet};

/// Bidirectional token/id mapping with per-token document frequencies.
pub struct Dictionary {
    token_to_id: HashMap<String, u32>,
    id_to_token: Vec<String>,
    doc_freqs: Vec<u32>,
    num_docs: usize,
}

impl Dictionary {
    /// Build a dictionary from tokenized documents.
    pub fn from_texts(texts: &[Vec<String>]) -> Self {
        let mut token_to_id: HashMap<String, u32> = HashMap::new();
        let mut id_to_token: Vec<String> = Vec::new();
        let mut doc_freqs: Vec<u32> = Vec::new();

        for text in texts {
            let mut seen: HashSet<u32> = HashSet::new();
            for token in text {
                let id = match token_to_id.get(token) {
                    Some(&id) => id,
                    None => {
                        let id = id_to_token.len() as u32;
                        token_to_id.insert(token.clone(), id);
                        id_to_token.push(token.clone());
                        doc_freqs.push(0);
                        id
                    }
                };
                if seen.insert(id) {
                    doc_freqs[id as usize] += 1;
                }
            }
        }

        Self {
            token_to_id,
            id_to_token,
            doc_freqs,
            num_docs: texts.len(),
        }
    }

    /// Look up a token's id, if the token occurs anywhere in the corpus.
    pub fn id_of(&self, token: &str) -> Option<u32> {
        self.token_to_id.get(token).copied()
    }

    /// Reverse lookup: the token behind an id.
    pub fn token_of(&self, id: u32) -> Option<&str> {
        self.id_to_token.get(id as usize).map(String::as_str)
    }

    /// Number of documents this token appears in.
    pub fn doc_freq(&self, id: u32) -> u32 {
        self.doc_freqs.get(id as usize).copied().unwrap_or(0)
    }

    /// Vocabulary size.
    pub fn len(&self) -> usize {
        self.id_to_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_token.is_empty()
    }

    /// Number of documents the dictionary was built from.
    pub fn num_docs(&self) -> usize {
        self.num_docs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(docs: &[&str]) -> Vec<Vec<String>> {
        docs.iter()
            .map(|d| d.split_whitespace().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_ids_round_trip() {
        let dict = Dictionary::from_texts(&texts(&["a b c", "b c d"]));
        assert_eq!(dict.len(), 4);
        assert_eq!(dict.num_docs(), 2);
        for token in ["a", "b", "c", "d"] {
            let id = dict.id_of(token).unwrap();
            assert_eq!(dict.token_of(id), Some(token));
        }
        assert_eq!(dict.id_of("missing"), None);
    }

    #[test]
    fn test_doc_freqs_count_documents_not_occurrences() {
        // "b" appears twice in the first doc but in only two documents
        let dict = Dictionary::from_texts(&texts(&["b b a", "b c", "c"]));
        assert_eq!(dict.doc_freq(dict.id_of("b").unwrap()), 2);
        assert_eq!(dict.doc_freq(dict.id_of("a").unwrap()), 1);
        assert_eq!(dict.doc_freq(dict.id_of("c").unwrap()), 2);
    }

    #[test]
    fn test_empty_corpus() {
        let dict = Dictionary::from_texts(&[]);
        assert!(dict.is_empty());
        assert_eq!(dict.num_docs(), 0);
    }
}
