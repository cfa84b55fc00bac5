//! PRESC: ungrounded prescriptive claim.
//!
//! Every obligation ("must", "should", "the only way") needs its own
//! grounding within ±10 tokens: a causal connective, conditional, citation or
//! measured unit. One ungrounded obligation is minor, more are severe.

use std::sync::LazyLock;

use super::lexicon::Lexicon;
use super::text::{char_offset, TokenWindow};
use crate::domain::{ConstraintKind, Location, Severity, ViolationRecord};

pub const WINDOW: TokenWindow = TokenWindow::new(10, 7);

static OBLIGATION_MARKERS: LazyLock<Lexicon> = LazyLock::new(|| {
    Lexicon::new(&[
        r"(?i)\b(?:must|should|shall|has\s+to|need\s+to|ought\s+to)\b",
        r"(?i)\bthe\s+(?:best|only|correct)\s+(?:way|approach|method)\b",
        r"(?i)\byou\s+(?:must|should|need\s+to)\b",
        r"(?i)\bit\s+is\s+(?:essential|necessary|critical|imperative)\b",
    ])
});

static GROUNDING_MARKERS: LazyLock<Lexicon> = LazyLock::new(|| {
    Lexicon::new(&[
        r"(?i)\b(?:because|since|given\s+that|due\s+to|as\s+a\s+result)\b",
        r"(?i)\b(?:if|when|unless|provided\s+that|assuming)\b",
        r"(?i)\b(?:according\s+to|based\s+on|per\s+(?:the|section))\b",
        r"(?i)\b(?:spec|RFC|section\s+\d+|requirement)\b",
        r"\b\d+\.?\d*\s*(?:%|ms|bytes?|Hz|MB|GB|KB)\b",
        r"\b\w+\.(?:py|rs|cpp|js|ts)\b",
        r"`[^`]+`",
    ])
});

/// Detect obligations that carry no grounding of their own.
pub fn ungrounded_prescription(text: &str) -> Option<ViolationRecord> {
    let hits = OBLIGATION_MARKERS.hits(text);
    if hits.is_empty() {
        return None;
    }

    let ungrounded: Vec<_> = hits
        .iter()
        .filter(|hit| !GROUNDING_MARKERS.matches(WINDOW.around(text, hit.start)))
        .collect();
    let severity = Severity::from_unmitigated(ungrounded.len())?;
    let first = ungrounded.first()?;

    Some(
        ViolationRecord::new(
            ConstraintKind::Prescriptive,
            severity,
            Location::Offset(char_offset(text, first.start)),
        )
        .with_meta("prescriptives", hits.len())
        .with_meta("ungrounded", ungrounded.len())
        .with_meta("sample", first.text),
    )
}
