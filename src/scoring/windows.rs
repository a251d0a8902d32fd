// Boolean sliding-window co-occurrence statistics.
//
// The probability-estimation stage shared by all three coherence measures.
// A window of fixed size slides step-1 over each tokenized document; a
// document shorter than the window contributes exactly one window. Each
// window is treated as a boolean set: we count in how many windows each
// tracked word appears, and in how many windows each tracked word pair
// co-occurs. Counting is restricted to the topic words under evaluation —
// the rest of the vocabulary only occupies window positions.

use std::collections::{BTreeSet, HashMap, HashSet};

/// Normalize an unordered pair key.
pub fn pair_key(a: u32, b: u32) -> (u32, u32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Accumulated window/co-window counts over a corpus.
pub struct WindowStats {
    window_size: usize,
    num_windows: u64,
    occurrences: HashMap<u32, u64>,
    co_occurrences: HashMap<(u32, u32), u64>,
}

impl WindowStats {
    pub fn new(window_size: usize) -> Self {
        assert!(window_size >= 1, "window size must be at least 1");
        Self {
            window_size,
            num_windows: 0,
            occurrences: HashMap::new(),
            co_occurrences: HashMap::new(),
        }
    }

    /// Count the windows of one document.
    ///
    /// `doc` holds one slot per token position: `Some(id)` for tracked words,
    /// `None` for everything else. `pairs` is the set of normalized word-id
    /// pairs whose co-occurrence is worth counting.
    pub fn add_document(&mut self, doc: &[Option<u32>], pairs: &HashSet<(u32, u32)>) {
        if doc.len() <= self.window_size {
            let present: BTreeSet<u32> = doc.iter().flatten().copied().collect();
            let present: Vec<u32> = present.into_iter().collect();
            self.record_window(&present, pairs);
            return;
        }

        // Multiset of tracked ids currently inside the window
        let mut counts: HashMap<u32, usize> = HashMap::new();
        for slot in &doc[..self.window_size] {
            if let Some(id) = slot {
                *counts.entry(*id).or_insert(0) += 1;
            }
        }
        self.record_counts(&counts, pairs);

        for i in self.window_size..doc.len() {
            if let Some(id) = doc[i - self.window_size] {
                match counts.get_mut(&id) {
                    Some(c) if *c > 1 => *c -= 1,
                    _ => {
                        counts.remove(&id);
                    }
                }
            }
            if let Some(id) = doc[i] {
                *counts.entry(id).or_insert(0) += 1;
            }
            self.record_counts(&counts, pairs);
        }
    }

    fn record_counts(&mut self, counts: &HashMap<u32, usize>, pairs: &HashSet<(u32, u32)>) {
        let present: Vec<u32> = counts.keys().copied().collect();
        self.record_window(&present, pairs);
    }

    fn record_window(&mut self, present: &[u32], pairs: &HashSet<(u32, u32)>) {
        self.num_windows += 1;
        for &id in present {
            *self.occurrences.entry(id).or_insert(0) += 1;
        }
        for (i, &a) in present.iter().enumerate() {
            for &b in &present[i + 1..] {
                let key = pair_key(a, b);
                if pairs.contains(&key) {
                    *self.co_occurrences.entry(key).or_insert(0) += 1;
                }
            }
        }
    }

    /// Total windows seen across all documents.
    pub fn num_windows(&self) -> u64 {
        self.num_windows
    }

    /// Windows containing the word.
    pub fn window_count(&self, id: u32) -> u64 {
        self.occurrences.get(&id).copied().unwrap_or(0)
    }

    /// Windows containing both words. The diagonal collapses to the single
    /// word's count.
    pub fn cowindow_count(&self, a: u32, b: u32) -> u64 {
        if a == b {
            return self.window_count(a);
        }
        self.co_occurrences.get(&pair_key(a, b)).copied().unwrap_or(0)
    }

    /// P(w) — fraction of windows containing the word.
    pub fn probability(&self, id: u32) -> f64 {
        if self.num_windows == 0 {
            return 0.0;
        }
        self.window_count(id) as f64 / self.num_windows as f64
    }

    /// P(w_a, w_b) — fraction of windows containing both words.
    pub fn joint_probability(&self, a: u32, b: u32) -> f64 {
        if self.num_windows == 0 {
            return 0.0;
        }
        self.cowindow_count(a, b) as f64 / self.num_windows as f64
    }
}
