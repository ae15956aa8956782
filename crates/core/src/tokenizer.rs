//! Prompt label tokenizer.
//!
//! Splits a comma/newline separated blob into trimmed, unique labels in
//! first-seen order.

use std::collections::HashSet;

/// Characters that separate labels. Runs of them collapse into one split.
const SEPARATORS: [char; 2] = [',', '\n'];

/// Tokenize raw prompt text into an ordered, duplicate-free label list.
pub fn tokenize(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(SEPARATORS)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter(|token| seen.insert(*token))
        .map(str::to_owned)
        .collect()
}
