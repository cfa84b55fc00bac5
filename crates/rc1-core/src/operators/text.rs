//! Text primitives shared by the operators: character windows, sentence
//! segmentation and token-set overlap.
//!
//! Regex matches report byte offsets; everything user-facing (locations,
//! window radii, previews) is expressed in characters.

use std::collections::HashSet;

/// An N-token window approximated as a symmetric character span.
///
/// No real tokenization happens: the radius is `tokens * chars_per_token`
/// characters on each side of the trigger's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenWindow {
    pub tokens: usize,
    pub chars_per_token: usize,
}

impl TokenWindow {
    pub const fn new(tokens: usize, chars_per_token: usize) -> Self {
        Self {
            tokens,
            chars_per_token,
        }
    }

    /// Radius in characters.
    pub const fn radius(self) -> usize {
        self.tokens * self.chars_per_token
    }

    /// The slice `[pos - radius, pos + radius)` in characters, clamped to the
    /// text bounds. `byte_pos` must lie on a char boundary.
    pub fn around(self, text: &str, byte_pos: usize) -> &str {
        let radius = self.radius();

        let start = if radius == 0 {
            byte_pos
        } else {
            text[..byte_pos]
                .char_indices()
                .rev()
                .nth(radius - 1)
                .map_or(0, |(i, _)| i)
        };

        let end = text[byte_pos..]
            .char_indices()
            .nth(radius)
            .map(|(i, _)| byte_pos + i)
            .unwrap_or(text.len());

        &text[start..end]
    }
}

/// Character offset of `byte_pos`.
pub fn char_offset(text: &str, byte_pos: usize) -> usize {
    text[..byte_pos].chars().count()
}

/// Length of `text` in characters.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// First `max_chars` characters of `text`.
pub fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Split `text` into sentences.
///
/// A boundary sits after `.`, `!` or `?` when it is followed by at least one
/// whitespace character and then an ASCII uppercase letter. The whitespace
/// run is dropped. Always returns at least one segment; abbreviations such
/// as "e.g. Foo" will split, and a lowercase continuation never does.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut seg_start = 0;

    for (i, c) in text.char_indices() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let ws_start = i + c.len_utf8();
        let rest = &text[ws_start..];
        let ws_len: usize = rest
            .chars()
            .take_while(|ch| ch.is_whitespace())
            .map(char::len_utf8)
            .sum();
        if ws_len > 0 && rest[ws_len..].starts_with(|ch: char| ch.is_ascii_uppercase()) {
            sentences.push(&text[seg_start..ws_start]);
            seg_start = ws_start + ws_len;
        }
    }

    sentences.push(&text[seg_start..]);
    sentences
}

/// The sentence around `byte_pos`, bounded by the nearest `.` before it and
/// the nearest `.` at or after it (inclusive). Falls back to the text edges.
pub fn enclosing_sentence(text: &str, byte_pos: usize) -> &str {
    let start = text[..byte_pos].rfind('.').map(|i| i + 1).unwrap_or(0);
    let end = text[byte_pos..]
        .find('.')
        .map(|i| byte_pos + i + 1)
        .unwrap_or(text.len());
    &text[start..end]
}

/// Lowercased whitespace tokens with surrounding ASCII punctuation removed.
pub fn token_set(sentence: &str) -> HashSet<String> {
    sentence
        .to_lowercase()
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| c.is_ascii_punctuation()))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Jaccard overlap `|A ∩ B| / |A ∪ B|` of two sentences' token sets.
/// Zero when either set is empty.
pub fn jaccard(a: &str, b: &str) -> f64 {
    let set_a = token_set(a);
    let set_b = token_set(b);
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f64 / union as f64
}
