//! H2: undissolved metaphor.
//!
//! Figurative markers (simile cues, animation verbs, body/organic imagery)
//! must be dissolved by an explicit literal rephrasing nearby. Each trigger is
//! checked against its own ±20-token window:
//!
//! | triggers | dissolved        | severity |
//! |----------|------------------|----------|
//! | none     | -                | 0        |
//! | n        | n                | 0        |
//! | n        | 1..n-1           | 1        |
//! | n        | 0                | 2        |

use std::sync::LazyLock;

use super::lexicon::Lexicon;
use super::text::{char_offset, TokenWindow};
use crate::domain::{ConstraintKind, Location, Severity, ViolationRecord};

pub const WINDOW: TokenWindow = TokenWindow::new(20, 6);

static METAPHOR_MARKERS: LazyLock<Lexicon> = LazyLock::new(|| {
    Lexicon::new(&[
        r"(?i)\blike\s+a\b",
        r"(?i)\bas\s+if\b",
        r"(?i)\bmetaphor\s+for\b",
        r"(?i)\bis\s+the\s+\w+\s+of\b",
        r"(?i)\b(?:ghost|spirit|soul|heart|blood|veins?)\b",
        r"(?i)\b(?:dances?|dancing|weaves?|weaving|breathes?|breathing)\b",
        r"(?i)\b(?:forged?|tempered|inhabits?|haunts?)\b",
        r"(?i)\b(?:seed|bloom|blossoms?)\b",
        r"(?i)\b(?:resonat\w+)\b",
        r"(?i)\b(?:cathedral|fortress|tower)\s+of\b",
    ])
});

static DISSOLUTION_MARKERS: LazyLock<Lexicon> = LazyLock::new(|| {
    Lexicon::new(&[
        r"(?i)\bliterally\b",
        r"(?i)\bactually\b",
        r"(?i)\bmeans?\b",
        r"(?i)\bmeaning\b",
        r"(?i)\bmaps?\s+to\b",
        r"(?i)\bdefined\s+as\b",
        r"(?i)\bequivalent\s+to\b",
        r"(?i)\bimplemented\s+as\b",
        r"(?i)\bin\s+code:?\b",
        r"(?i)\bspecifically:?\b",
        r"(?i)\bi\.e\.",
        r"(?i)\bconcretely:?\b",
    ])
});

/// Detect metaphors that are not followed (or preceded) by a literal rephrasing.
pub fn undissolved_metaphor(text: &str) -> Option<ViolationRecord> {
    let hits = METAPHOR_MARKERS.hits(text);
    let first = hits.first()?;

    let dissolved = hits
        .iter()
        .filter(|hit| DISSOLUTION_MARKERS.matches(WINDOW.around(text, hit.start)))
        .count();
    let total = hits.len();

    if dissolved >= total {
        return None;
    }
    let (severity, reason) = if dissolved > 0 {
        (Severity::Minor, "partial dissolution")
    } else {
        (Severity::Severe, "undissolved")
    };

    Some(
        ViolationRecord::new(
            ConstraintKind::Metaphor,
            severity,
            Location::Offset(char_offset(text, first.start)),
        )
        .with_meta("metaphors", total)
        .with_meta("dissolved", dissolved)
        .with_meta("sample", first.text)
        .with_meta("reason", reason),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_text_has_no_metaphor() {
        assert!(undissolved_metaphor("The function returns 256 bytes at O(1) cost.").is_none());
    }

    #[test]
    fn metaphor_without_rephrasing_is_severe() {
        let record = undissolved_metaphor("The code breathes fire into the void.").unwrap();
        assert_eq!(record.severity, Severity::Severe);
        assert_eq!(record.location, Location::Offset(9));
        assert_eq!(record.meta_str("sample"), Some("breathes"));
    }

    #[test]
    fn dissolved_metaphor_is_clean() {
        let text = "The system is the heart of the architecture. That is, it means the central dispatch loop.";
        assert!(undissolved_metaphor(text).is_none());
    }

    #[test]
    fn partial_dissolution_is_minor() {
        let filler = "x ".repeat(80);
        let text = format!("The ghost, meaning the daemon. {filler}Later the code breathes again.");
        let record = undissolved_metaphor(&text).unwrap();
        assert_eq!(record.severity, Severity::Minor);
        assert_eq!(record.metadata["metaphors"], 2);
        assert_eq!(record.metadata["dissolved"], 1);
    }
}
