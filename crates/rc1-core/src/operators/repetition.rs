//! LOOP: rephrasing loop between adjacent sentences.
//!
//! Adjacent sentences whose token sets overlap by more than [`THRESHOLD`]
//! (Jaccard) repeat each other. One repeating pair is minor, several are
//! severe. There is no mitigator.

use super::text::{jaccard, split_sentences};
use crate::domain::{ConstraintKind, Location, Severity, ViolationRecord};

/// Similarity must be strictly greater than this to count as a repeat.
pub const THRESHOLD: f64 = 0.7;

/// Detect adjacent sentences that restate each other.
pub fn rephrasing_loop(text: &str) -> Option<ViolationRecord> {
    let sentences = split_sentences(text);

    let repeats: Vec<(usize, f64)> = sentences
        .windows(2)
        .enumerate()
        .map(|(i, pair)| (i, jaccard(pair[0], pair[1])))
        .filter(|&(_, sim)| sim > THRESHOLD)
        .collect();

    let &(first, similarity) = repeats.first()?;
    let (severity, reason) = if repeats.len() == 1 {
        (Severity::Minor, "minor rephrasing")
    } else {
        (Severity::Severe, "severe rephrasing loop")
    };

    Some(
        ViolationRecord::new(ConstraintKind::Loop, severity, Location::SentencePair(first))
            .with_meta("repeats", repeats.len())
            .with_meta("similarity", (similarity * 10_000.0).round() / 10_000.0)
            .with_meta("reason", reason),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_steps_do_not_loop() {
        let text = "Step 1: parse input. Step 2: validate output. Step 3: return result.";
        assert!(rephrasing_loop(text).is_none());
    }

    #[test]
    fn single_restatement_is_minor() {
        let text = "The system processes the input data and returns the output result. The system processes the input data and returns the output.";
        let record = rephrasing_loop(text).unwrap();
        assert_eq!(record.severity, Severity::Minor);
        assert_eq!(record.location, Location::SentencePair(0));
        assert_eq!(record.metadata["repeats"], 1);
    }

    #[test]
    fn repeated_restatements_are_severe() {
        let text = "The cache stores parsed tokens. The cache stores the parsed tokens. The cache stores parsed tokens.";
        let record = rephrasing_loop(text).unwrap();
        assert_eq!(record.severity, Severity::Severe);
        assert_eq!(record.metadata["repeats"], 2);
    }

    #[test]
    fn exact_threshold_is_not_a_repeat() {
        // 7 shared of 10 total tokens: similarity == 0.7 exactly
        let text = "A b c d e f g h. A b c d e f g i j.";
        assert!(rephrasing_loop(text).is_none());
    }
}
