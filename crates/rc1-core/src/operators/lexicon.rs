//! Compiled pattern lists.
//!
//! A [`Lexicon`] is an ordered list of regular expressions. Every match of
//! every pattern is a separate hit: overlapping matches from different
//! patterns are not deduplicated.

use regex::Regex;

/// One trigger occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit<'t> {
    /// Byte offset of the match start.
    pub start: usize,
    /// Matched text.
    pub text: &'t str,
}

#[derive(Debug)]
pub struct Lexicon {
    patterns: Vec<Regex>,
}

impl Lexicon {
    /// Compile a static pattern list.
    ///
    /// Patterns are literals owned by this crate; a pattern that fails to
    /// compile is a programming error.
    pub fn new(patterns: &[&str]) -> Self {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p).unwrap_or_else(|e| panic!("invalid lexicon pattern {p:?}: {e}")))
            .collect();
        Self { patterns }
    }

    /// All hits of all patterns, ordered by start offset. Ties keep pattern
    /// order.
    pub fn hits<'t>(&self, text: &'t str) -> Vec<Hit<'t>> {
        let mut hits: Vec<Hit<'t>> = self
            .patterns
            .iter()
            .flat_map(|re| re.find_iter(text))
            .map(|m| Hit {
                start: m.start(),
                text: m.as_str(),
            })
            .collect();
        hits.sort_by_key(|h| h.start);
        hits
    }

    /// Whether any pattern matches anywhere in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
