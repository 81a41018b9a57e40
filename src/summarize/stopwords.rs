use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::Arc;
use stop_words::{get, LANGUAGE};

static ENGLISH: Lazy<Arc<StopwordSet>> =
    Lazy::new(|| Arc::new(StopwordSet::from_words(get(LANGUAGE::English).iter())));

#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// NLTK English list, built on first use and shared.
    pub fn english() -> Arc<StopwordSet> {
        ENGLISH.clone()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// One word per line, `#` starts a comment.
    pub fn parse(content: &str) -> Self {
        Self::from_words(
            content
                .lines()
                .map(|line| line.split('#').next().unwrap_or("")),
        )
    }

    pub fn union(&self, other: &StopwordSet) -> StopwordSet {
        StopwordSet {
            words: self.words.union(&other.words).cloned().collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
