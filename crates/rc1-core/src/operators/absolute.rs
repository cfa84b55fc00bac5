//! ABS: absolute claim without scope.
//!
//! Unconditional quantifiers and certainty words are acceptable when any of
//! them has a scoping hedge, conditional or evidence reference (file
//! extension, code span, measured unit, spec citation) within ±10 tokens.
//! Otherwise the claim is severe.

use std::sync::LazyLock;

use super::lexicon::Lexicon;
use super::text::{char_offset, TokenWindow};
use crate::domain::{ConstraintKind, Location, Severity, ViolationRecord};

pub const WINDOW: TokenWindow = TokenWindow::new(10, 7);

static ABSOLUTE_MARKERS: LazyLock<Lexicon> = LazyLock::new(|| {
    Lexicon::new(&[
        r"(?i)\b(?:always|never|all|none|every)\b",
        r"(?i)\b(?:certainly|obviously|clearly|undoubtedly|definitely)\b",
        r"(?i)\b(?:proves?|proven|guarantees?|guaranteed)\b",
        r"(?i)\bit\s+is\s+(?:clear|certain|obvious)\b",
        r"(?i)\bno\s+\w+\s+can\b",
        r"(?i)\b(?:must\s+be|cannot\s+be)\b",
    ])
});

static SCOPING_MARKERS: LazyLock<Lexicon> = LazyLock::new(|| {
    Lexicon::new(&[
        r"(?i)\bin\s+(?:some|this|certain|most)\s+cases?\b",
        r"(?i)\bfor\s+(?:this|the\s+current)\s+version\b",
        r"(?i)\b(?:approximately|roughly|likely|possibly|may|might|could)\b",
        r"(?i)\b(?:suggests?|indicates?|appears?\s+to)\b",
        r"(?i)\bunder\s+(?:these|certain|normal)\s+conditions?\b",
        r"(?i)\b(?:typically|usually|often|sometimes|generally)\b",
        r"(?i)\b(?:if|when|unless|provided\s+that|assuming)\b",
        r"(?i)\b(?:because|since|given\s+that|due\s+to|as\s+a\s+result)\b",
        r"(?i)\b(?:according\s+to|based\s+on)\b",
        // Evidence references
        r"\b(?:\.py|\.rs|\.cpp|\.js|\.ts)\b",
        r"`[^`]+`",
        r"\b\d+\.?\d*\s*(?:%|ms|bytes?|Hz|MB|GB|KB)\b",
        r"(?i)\b(?:spec|RFC|section\s+\d+|table\s+\d+)\b",
    ])
});

/// Detect absolute claims with no scoping language near any of them.
pub fn unscoped_absolute(text: &str) -> Option<ViolationRecord> {
    let hits = ABSOLUTE_MARKERS.hits(text);
    let first = hits.first()?;

    let scoped = hits
        .iter()
        .any(|hit| SCOPING_MARKERS.matches(WINDOW.around(text, hit.start)));
    if scoped {
        return None;
    }

    Some(
        ViolationRecord::new(
            ConstraintKind::Absolute,
            Severity::Severe,
            Location::Offset(char_offset(text, first.start)),
        )
        .with_meta("absolutes", hits.len())
        .with_meta("scoped", false)
        .with_meta("sample", first.text),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hedged_measurement_is_clean() {
        assert!(unscoped_absolute("The latency is approximately 12ms under normal load.").is_none());
    }

    #[test]
    fn bare_absolutes_are_severe() {
        let record = unscoped_absolute("This always works and never fails.").unwrap();
        assert_eq!(record.severity, Severity::Severe);
        assert_eq!(record.location, Location::Offset(5));
        assert_eq!(record.metadata["absolutes"], 2);
        assert_eq!(record.meta_str("sample"), Some("always"));
    }

    #[test]
    fn causal_grounding_scopes_the_claim() {
        assert!(unscoped_absolute("This always returns 256 bits because the SHA3 spec requires it.").is_none());
        assert!(unscoped_absolute("Under these conditions, it is guaranteed to converge.").is_none());
    }

    #[test]
    fn scope_outside_the_window_does_not_count() {
        let filler = "word ".repeat(30);
        let text = format!("This always works. {filler}It might rain.");
        assert!(unscoped_absolute(&text).is_some());
    }
}
