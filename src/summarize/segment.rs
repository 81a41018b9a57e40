use crate::summarize::stopwords::StopwordSet;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
// `[12]`, and an empty `[]` too
static CITATION_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[0-9]*\]").unwrap());
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "ft", "vs", "etc", "al", "approx",
    "dept", "est", "pp", "inc", "ltd", "co", "corp", "bros", "gen", "gov", "sen", "rep", "col",
    "lt", "capt", "sgt", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct",
    "nov", "dec",
];

// Only abbreviations when a number follows: "No. 5", "Fig. 3".
const NUMBERED_ABBREVIATIONS: &[&str] = &["no", "nos", "vol", "fig", "figs"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Segmenter {
    abbreviations: HashSet<String>,
    // words that commonly open a sentence; "C. It" splits, "J. Smith" does not
    sentence_starters: Arc<StopwordSet>,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|a| a.to_string()).collect(),
            sentence_starters: StopwordSet::english(),
        }
    }
}

impl Segmenter {
    pub fn sentences(&self, document: &str) -> Vec<Sentence> {
        let chars: Vec<(usize, char)> = document.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0usize;
        let mut i = 0usize;

        while i < chars.len() {
            if !is_terminal(chars[i].1) {
                i += 1;
                continue;
            }
            let mut run_end = i + 1;
            while run_end < chars.len() && is_terminal(chars[run_end].1) {
                run_end += 1;
            }
            let mut end = run_end;
            while end < chars.len() && is_closer(chars[end].1) {
                end += 1;
            }

            if end < chars.len() && !chars[end].1.is_whitespace() {
                // e.g. "3.14" or "a.b": not a boundary
                i = end;
                continue;
            }

            let single_period = chars[i].1 == '.' && run_end == i + 1;
            let boundary = end >= chars.len()
                || self.is_boundary(&document[start..chars[i].0], single_period, &chars[end..]);
            if boundary {
                let end_byte = chars.get(end).map(|(b, _)| *b).unwrap_or(document.len());
                push_sentence(&mut sentences, &document[start..end_byte]);
                start = end_byte;
            }
            i = end;
        }
        push_sentence(&mut sentences, &document[start..]);
        sentences
    }

    fn is_boundary(&self, before: &str, single_period: bool, rest: &[(usize, char)]) -> bool {
        let next: String = rest
            .iter()
            .map(|(_, c)| *c)
            .skip_while(|c| c.is_whitespace())
            .take_while(|c| !c.is_whitespace())
            .collect();
        let Some(first) = next.chars().next() else {
            return true;
        };
        if first.is_lowercase() {
            return false;
        }
        if !single_period {
            return true;
        }
        let word = before
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or("")
            .trim_start_matches(|c: char| !c.is_alphanumeric());
        !self.is_abbreviation(word, &next)
    }

    fn is_abbreviation(&self, word: &str, next: &str) -> bool {
        let lower = word.to_lowercase();
        if lower.is_empty() {
            return false;
        }
        if self.abbreviations.contains(&lower) {
            return true;
        }
        if NUMBERED_ABBREVIATIONS.contains(&lower.as_str()) {
            return next.starts_with(|c: char| c.is_ascii_digit());
        }
        let mut letters = word.chars();
        if let (Some(c), None) = (letters.next(), letters.next()) {
            return self.is_initial(c, next);
        }
        // dotted forms like "e.g", "i.e", "u.s", "p.m"
        lower.contains('.')
            && lower
                .split('.')
                .all(|part| !part.is_empty() && part.chars().count() <= 2)
    }

    fn is_initial(&self, letter: char, next: &str) -> bool {
        if !letter.is_uppercase() || letter == 'I' {
            return false;
        }
        let mut chars = next.chars();
        match (chars.next(), chars.next()) {
            (Some(a), Some('.')) => a.is_uppercase(),
            (Some(a), Some(b)) if a.is_uppercase() && b.is_alphabetic() => {
                let word = next
                    .trim_end_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase();
                !self.sentence_starters.contains(&word)
            }
            _ => false,
        }
    }
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '}' | '”' | '’' | '»')
}

fn push_sentence(sentences: &mut Vec<Sentence>, raw: &str) {
    let text = raw.trim();
    if !text.is_empty() {
        sentences.push(Sentence {
            index: sentences.len(),
            text: text.to_string(),
        });
    }
}

/// Collapse whitespace, drop citation markers and punctuation, lowercase.
pub fn normalize(text: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    let uncited = CITATION_MARKER.replace_all(&collapsed, " ");
    NON_WORD.replace_all(&uncited, "").to_lowercase()
}

pub fn tokenize(normalized: &str) -> impl Iterator<Item = &str> {
    WORD.find_iter(normalized).map(|m| m.as_str())
}
