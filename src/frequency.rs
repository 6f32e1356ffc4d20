//! Turn a stream of titles (calendar events, tags, ...) into weighted words.

use std::collections::{HashMap, HashSet};

use crate::error::CloudError;
use crate::types::Word;

#[derive(Debug, Clone, Default)]
pub struct FrequencyMap {
    counts: HashMap<String, u64>,
    blocklist: HashSet<String>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Titles that are never counted.
    pub fn with_blocklist<I, S>(blocklist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            counts: HashMap::new(),
            blocklist: blocklist.into_iter().map(Into::into).collect(),
        }
    }

    pub fn add(&mut self, title: &str) {
        if title.is_empty() || self.blocklist.contains(title) {
            return;
        }
        *self.counts.entry(title.to_string()).or_insert(0) += 1;
    }

    pub fn extend<I, S>(&mut self, titles: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for title in titles {
            self.add(title.as_ref());
        }
    }

    pub fn count(&self, title: &str) -> u64 {
        self.counts.get(title).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn highest(&self) -> u64 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// Words weighted by `count / highest * scale`, heaviest first.
    ///
    /// Ties are ordered by title so the output is stable.
    pub fn to_words(&self, scale: f64) -> Result<Vec<Word>, CloudError> {
        let max = self.highest() as f64;
        let mut entries: Vec<(&String, &u64)> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
            .into_iter()
            .map(|(title, &count)| Word::new(title.clone(), count as f64 / max * scale))
            .collect()
    }
}
