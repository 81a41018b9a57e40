use crate::errors::SummarizeError;
use serde::{Deserialize, Serialize};

pub mod extractive;
pub mod frequency;
pub mod score;
pub mod segment;
pub mod select;
pub mod stopwords;

pub use score::ScoredSentence;
pub use select::SummaryOrder;
pub use stopwords::StopwordSet;

pub const DEFAULT_MAX_SENTENCES: usize = 3;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizeResult {
    pub summary: String,
    pub sentences: Vec<ScoredSentence>,
    pub backend: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    pub max_sentences: usize,
    pub order: SummaryOrder,
    pub collapse_duplicates: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_sentences: DEFAULT_MAX_SENTENCES,
            order: SummaryOrder::default(),
            collapse_duplicates: false,
        }
    }
}

impl SummaryOptions {
    pub fn validate(&self) -> Result<(), SummarizeError> {
        if self.max_sentences == 0 {
            return Err(SummarizeError::InvalidConfiguration(
                "max_sentences must be > 0".into(),
            ));
        }
        Ok(())
    }
}

pub trait Summarizer: Send + Sync {
    fn summarize(
        &self,
        document: &str,
        options: &SummaryOptions,
    ) -> Result<SummarizeResult, SummarizeError>;
}

use std::sync::Arc;

pub fn build_summarizer(stopwords: Arc<StopwordSet>) -> Arc<dyn Summarizer> {
    Arc::new(extractive::FrequencySummarizer::new(
        segment::Segmenter::default(),
        stopwords,
    ))
}
