use crate::errors::SummarizeError;
use crate::summarize::stopwords::StopwordSet;
use std::collections::HashMap;

/// Per-token importance weights, normalized so the most frequent
/// significant token weighs exactly 1.0.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    weights: HashMap<String, f64>,
    max_count: usize,
}

impl FrequencyTable {
    pub fn build<'a, I>(tokens: I, stopwords: &StopwordSet) -> Result<Self, SummarizeError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in tokens {
            if !stopwords.contains(token) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }

        let max_count = counts
            .values()
            .copied()
            .max()
            .ok_or(SummarizeError::NoSignificantWords)?;

        let weights = counts
            .into_iter()
            .map(|(token, count)| (token.to_string(), count as f64 / max_count as f64))
            .collect();
        Ok(Self { weights, max_count })
    }

    pub fn weight(&self, token: &str) -> Option<f64> {
        self.weights.get(token).copied()
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }
}
