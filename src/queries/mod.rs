//! Search query generation for callers that only have a claim.
//!
//! Entities are approximated by runs of capitalised words; no NER model.


use tracing::debug;

use crate::text::{is_stop_word, normalize_whitespace};

const CLAIM_SUFFIXES: [&str; 3] = ["fact check", "true or false", "hoax"];

/// Builds up to `max_queries` distinct queries, most general first.
pub fn generate_queries(claim: &str, max_queries: usize) -> Vec<String> {
    let claim = normalize_whitespace(claim);
    if claim.is_empty() || max_queries == 0 {
        return Vec::new();
    }

    let base = claim.to_lowercase();
    let mut candidates = vec![base.clone()];
    candidates.extend(CLAIM_SUFFIXES.iter().map(|s| format!("{base} {s}")));

    for entity in extract_entities(&claim) {
        candidates.push(format!("{entity} {base}"));
        candidates.push(format!("{entity} news verification"));
    }

    let mut queries: Vec<String> = Vec::with_capacity(max_queries);
    for candidate in candidates {
        if queries.len() == max_queries {
            break;
        }
        if !queries.contains(&candidate) {
            queries.push(candidate);
        }
    }

    debug!(queries = queries.len(), "Generated search queries");
    queries
}

/// Runs of capitalised words, e.g. `"Eiffel Tower"`, in order of appearance.
///
/// Leading stop words are dropped from a run and a lone capitalised first
/// word is treated as sentence case rather than a name, unless it is an
/// acronym.
pub fn extract_entities(claim: &str) -> Vec<String> {
    let mut entities: Vec<String> = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    let mut run_start = 0;

    let tokens: Vec<&str> = claim.split_whitespace().collect();
    for (position, raw) in tokens.iter().enumerate() {
        let word = clean_token(raw);
        let capitalised = word.chars().next().is_some_and(char::is_uppercase);

        if capitalised {
            if run.is_empty() {
                run_start = position;
            }
            run.push(word);
        }

        let ends_run = !capitalised || ends_clause(raw) || position + 1 == tokens.len();
        if ends_run && !run.is_empty() {
            push_entity(&mut entities, &run, run_start);
            run.clear();
        }
    }

    entities
}

fn push_entity(entities: &mut Vec<String>, run: &[&str], run_start: usize) {
    let mut words = run;
    while let Some((first, rest)) = words.split_first() {
        if is_stop_word(&first.to_lowercase()) {
            words = rest;
        } else {
            break;
        }
    }

    let sentence_case = run_start == 0 && run.len() == 1 && !is_acronym(run[0]);
    if words.is_empty() || sentence_case {
        return;
    }

    let entity = words.join(" ");
    if !entities.contains(&entity) {
        entities.push(entity);
    }
}

fn is_acronym(word: &str) -> bool {
    word.chars().count() > 1 && word.chars().all(|c| !c.is_alphabetic() || c.is_uppercase())
}

fn clean_token(raw: &str) -> &str {
    let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
    word.strip_suffix("'s")
        .or_else(|| word.strip_suffix("\u{2019}s"))
        .unwrap_or(word)
}

fn ends_clause(raw: &str) -> bool {
    raw.ends_with([',', ';', ':', '.', '!', '?'])
}
