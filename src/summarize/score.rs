use crate::summarize::frequency::FrequencyTable;
use crate::summarize::segment::{tokenize, Sentence};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSentence {
    pub index: usize,
    pub score: f64,
    pub text: String,
}

/// Score every sentence by summing the table weights of the tokens in its
/// lowercased text. Sentences without a single weighted token are left out.
/// With `collapse_duplicates`, byte-identical sentences merge into the entry
/// of their first occurrence and their scores accumulate.
pub fn score_sentences(
    sentences: &[Sentence],
    table: &FrequencyTable,
    collapse_duplicates: bool,
) -> Vec<ScoredSentence> {
    let mut scored: Vec<ScoredSentence> = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for sentence in sentences {
        let lowered = sentence.text.to_lowercase();
        let weights: Vec<f64> = tokenize(&lowered)
            .filter_map(|token| table.weight(token))
            .collect();
        if weights.is_empty() {
            continue;
        }
        let score: f64 = weights.iter().sum();

        if collapse_duplicates {
            if let Some(&slot) = seen.get(sentence.text.as_str()) {
                scored[slot].score += score;
                continue;
            }
            seen.insert(sentence.text.as_str(), scored.len());
        }
        scored.push(ScoredSentence {
            index: sentence.index,
            score,
            text: sentence.text.clone(),
        });
    }
    scored
}
