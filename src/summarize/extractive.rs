use crate::errors::SummarizeError;
use crate::summarize::frequency::FrequencyTable;
use crate::summarize::score::score_sentences;
use crate::summarize::segment::{normalize, tokenize, Segmenter};
use crate::summarize::select::{join_sentences, select_sentences};
use crate::summarize::stopwords::StopwordSet;
use crate::summarize::{SummarizeResult, Summarizer, SummaryOptions};
use std::sync::Arc;

/// Word-frequency extractive summarizer. The segmenter and stopword set are
/// loaded once by the caller and shared across calls.
pub struct FrequencySummarizer {
    segmenter: Segmenter,
    stopwords: Arc<StopwordSet>,
}

impl FrequencySummarizer {
    pub fn new(segmenter: Segmenter, stopwords: Arc<StopwordSet>) -> Self {
        Self {
            segmenter,
            stopwords,
        }
    }
}

impl Summarizer for FrequencySummarizer {
    fn summarize(
        &self,
        document: &str,
        options: &SummaryOptions,
    ) -> Result<SummarizeResult, SummarizeError> {
        let sentences = self.segmenter.sentences(document);
        if sentences.is_empty() {
            return Err(SummarizeError::EmptyInput);
        }
        options.validate()?;

        let normalized = normalize(document);
        let table = FrequencyTable::build(tokenize(&normalized), &self.stopwords)?;
        let scored = score_sentences(&sentences, &table, options.collapse_duplicates);
        let scored_count = scored.len();
        let selected = select_sentences(scored, options.max_sentences, options.order);

        tracing::debug!(
            sentences = sentences.len(),
            scored = scored_count,
            selected = selected.len(),
            distinct_terms = table.len(),
            max_count = table.max_count(),
            order = ?options.order,
            "summary computed"
        );
        Ok(SummarizeResult {
            summary: join_sentences(&selected),
            sentences: selected,
            backend: "frequency".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarize::SummaryOrder;

    const PETS: &str = "Cats are great. Dogs are great too. Cats and dogs are both pets.";

    fn summarizer() -> FrequencySummarizer {
        FrequencySummarizer::new(Segmenter::default(), StopwordSet::english())
    }

    fn opts(max_sentences: usize, order: SummaryOrder) -> SummaryOptions {
        SummaryOptions {
            max_sentences,
            order,
            collapse_duplicates: false,
        }
    }

    #[test]
    fn picks_highest_scoring_sentence_verbatim() {
        let res = summarizer()
            .summarize(PETS, &opts(1, SummaryOrder::Score))
            .expect("summarize");
        assert_eq!(res.summary, "Cats and dogs are both pets.");
        assert_eq!(res.backend, "frequency");
        assert_eq!(res.sentences.len(), 1);
        assert_eq!(res.sentences[0].index, 2);
    }

    #[test]
    fn score_order_is_the_default_rendering() {
        let res = summarizer()
            .summarize(PETS, &SummaryOptions::default())
            .unwrap();
        assert_eq!(
            res.summary,
            "Cats and dogs are both pets. Cats are great. Dogs are great too."
        );
    }

    #[test]
    fn document_order_renders_in_reading_order() {
        let res = summarizer()
            .summarize(PETS, &opts(2, SummaryOrder::Document))
            .unwrap();
        assert_eq!(res.summary, "Cats are great. Cats and dogs are both pets.");
    }

    #[test]
    fn large_limit_returns_every_scored_sentence_once() {
        let res = summarizer()
            .summarize(PETS, &opts(50, SummaryOrder::Document))
            .unwrap();
        assert_eq!(res.summary, PETS);
    }

    #[test]
    fn empty_document_signals_empty_input() {
        let s = summarizer();
        for n in [0, 1, 3] {
            let err = s.summarize("", &opts(n, SummaryOrder::Score)).unwrap_err();
            assert_eq!(err, SummarizeError::EmptyInput);
        }
        assert_eq!(
            s.summarize(" \n\t", &SummaryOptions::default()).unwrap_err(),
            SummarizeError::EmptyInput
        );
    }

    #[test]
    fn stopword_only_document_signals_no_significant_words() {
        let err = summarizer()
            .summarize("the a an of.", &opts(3, SummaryOrder::Score))
            .unwrap_err();
        assert_eq!(err, SummarizeError::NoSignificantWords);
    }

    #[test]
    fn zero_sentences_is_invalid_configuration() {
        let err = summarizer()
            .summarize(PETS, &opts(0, SummaryOrder::Score))
            .unwrap_err();
        assert!(matches!(err, SummarizeError::InvalidConfiguration(_)));
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let doc = "Alpha beta gamma. Beta gamma delta. Gamma delta alpha. Delta alpha beta.";
        let s = summarizer();
        let first = s.summarize(doc, &opts(2, SummaryOrder::Score)).unwrap();
        for _ in 0..10 {
            let again = s.summarize(doc, &opts(2, SummaryOrder::Score)).unwrap();
            assert_eq!(again.summary, first.summary);
        }
        // all four tie at 3.0, so the two earliest win
        assert_eq!(first.summary, "Alpha beta gamma. Beta gamma delta.");
    }

    #[test]
    fn citations_do_not_become_terms() {
        let doc = "Rust is fast[1]. Rust is safe[2]. Speed matters[1][2].";
        let res = summarizer()
            .summarize(doc, &opts(1, SummaryOrder::Score))
            .unwrap();
        assert_eq!(res.summary, "Rust is fast[1].");
    }

    #[test]
    fn custom_stopwords_change_the_ranking() {
        let extra = StopwordSet::from_words(["cats", "dogs"]);
        let s = FrequencySummarizer::new(
            Segmenter::default(),
            Arc::new(StopwordSet::english().union(&extra)),
        );
        let res = s.summarize(PETS, &opts(1, SummaryOrder::Score)).unwrap();
        // only "great" and "pets" remain; "great" counts twice
        assert_eq!(res.summary, "Cats are great.");
    }

    #[test]
    fn summarizer_is_shareable_across_threads() {
        let s = Arc::new(summarizer());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let s = s.clone();
                std::thread::spawn(move || {
                    s.summarize(PETS, &SummaryOptions::default()).unwrap().summary
                })
            })
            .collect();
        let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(outputs.windows(2).all(|w| w[0] == w[1]));
    }
}
