//! Plain-text utilities: sentence segmentation and word normalisation.
//!
//! Segmentation is rule based (no model): paragraph breaks, then `.`/`!`/`?`
//! followed by whitespace, skipping common abbreviations and initials.


use std::collections::HashSet;
use std::sync::LazyLock;

use crate::constants::{MAX_DOCUMENT_CHARS, MAX_SENTENCES_PER_DOCUMENT, MIN_SENTENCE_CHARS};

const ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "st.", "vs.", "e.g.", "i.e.", "u.s.",
    "u.k.", "u.n.", "inc.", "ltd.", "co.", "corp.", "no.", "gen.", "gov.", "sen.", "rep.",
    "jan.", "feb.", "mar.", "apr.", "jun.", "jul.", "aug.", "sep.", "sept.", "oct.", "nov.",
    "dec.", "approx.", "fig.", "est.",
];

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
        "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "shall",
        "can", "to", "of", "in", "for", "on", "with", "at", "by", "from", "as", "into", "through",
        "during", "before", "after", "above", "below", "between", "under", "again", "further",
        "then", "once", "here", "there", "when", "where", "why", "how", "all", "each", "few",
        "more", "most", "other", "some", "such", "only", "own", "same", "so", "than", "too",
        "very", "just", "and", "but", "if", "or", "because", "until", "while", "what", "which",
        "who", "whom", "this", "that", "these", "those", "am", "it", "its", "about", "also",
        "says", "said",
    ]
    .into_iter()
    .collect()
});

/// Returns `true` for function words that carry no topical signal.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Lower-cased alphanumeric words of `text`, stop words removed, in order.
pub fn content_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !is_stop_word(w))
        .map(str::to_string)
        .collect()
}

/// Collapses every whitespace run to a single space and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Longest prefix of `text` with at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Splits cleaned document text into candidate evidence sentences.
///
/// Only the first [`MAX_DOCUMENT_CHARS`] characters are considered. Sentences
/// of [`MIN_SENTENCE_CHARS`] characters or fewer are discarded and at most
/// [`MAX_SENTENCES_PER_DOCUMENT`] are returned.
pub fn split_sentences(text: &str) -> Vec<String> {
    let text = truncate_chars(text, MAX_DOCUMENT_CHARS);

    let mut sentences = Vec::new();
    for paragraph in paragraphs(text) {
        split_paragraph(&paragraph, &mut sentences);
        if sentences.len() >= MAX_SENTENCES_PER_DOCUMENT {
            break;
        }
    }

    sentences.truncate(MAX_SENTENCES_PER_DOCUMENT);
    sentences
}

fn paragraphs(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(normalize_whitespace(&current.join(" ")));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(normalize_whitespace(&current.join(" ")));
    }

    out
}

fn split_paragraph(paragraph: &str, out: &mut Vec<String>) {
    let chars: Vec<(usize, char)> = paragraph.char_indices().collect();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i].1;
        if !matches!(c, '.' | '!' | '?') {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < chars.len() && is_terminal_trailer(chars[j].1) {
            j += 1;
        }

        let at_end = j == chars.len();
        if !at_end && !chars[j].1.is_whitespace() {
            i = j;
            continue;
        }

        let end = if at_end { paragraph.len() } else { chars[j].0 };
        let single_period = c == '.' && j == i + 1;
        if single_period && ends_with_abbreviation(&paragraph[start..end]) {
            i = j;
            continue;
        }

        push_sentence(&paragraph[start..end], out);
        start = end;
        i = j;
    }

    if start < paragraph.len() {
        push_sentence(&paragraph[start..], out);
    }
}

fn is_terminal_trailer(c: char) -> bool {
    matches!(
        c,
        '.' | '!' | '?' | '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}'
    )
}

fn ends_with_abbreviation(candidate: &str) -> bool {
    let Some(last) = candidate.split_whitespace().last() else {
        return false;
    };
    let token = last
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();

    if ABBREVIATIONS.contains(&token.as_str()) {
        return true;
    }

    // single-letter initial such as "J."
    let mut letters = token.chars();
    matches!(
        (letters.next(), letters.next(), letters.next()),
        (Some(l), Some('.'), None) if l.is_alphabetic()
    )
}

fn push_sentence(raw: &str, out: &mut Vec<String>) {
    let sentence = raw.trim();
    if sentence.chars().count() > MIN_SENTENCE_CHARS {
        out.push(sentence.to_string());
    }
}
