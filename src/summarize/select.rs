use crate::summarize::score::ScoredSentence;
use serde::{Deserialize, Serialize};

/// Order in which selected sentences are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SummaryOrder {
    /// Highest score first.
    #[default]
    Score,
    /// Original reading order.
    Document,
}

/// Keep the `max_sentences` best sentences. Equal scores rank by document
/// position, earliest first.
pub fn select_sentences(
    mut scored: Vec<ScoredSentence>,
    max_sentences: usize,
    order: SummaryOrder,
) -> Vec<ScoredSentence> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
    scored.truncate(max_sentences);
    if order == SummaryOrder::Document {
        scored.sort_by_key(|s| s.index);
    }
    scored
}

pub fn join_sentences(selected: &[ScoredSentence]) -> String {
    selected
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
