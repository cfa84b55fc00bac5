//! ESC: abstraction escalation.
//!
//! Works on adjacent sentence pairs rather than windows. A pair escalates when
//! sentence `i` uses technical vocabulary and sentence `i + 1` jumps to
//! high-abstraction vocabulary. Explicit reasoning tokens anywhere in the two
//! sentences bridge the jump. The first unbridged pair is severe.

use std::sync::LazyLock;

use super::lexicon::Lexicon;
use super::text::{preview, split_sentences};
use crate::domain::{ConstraintKind, Location, Severity, ViolationRecord};

const PREVIEW_CHARS: usize = 60;

static TECHNICAL_DOMAIN: LazyLock<Lexicon> = LazyLock::new(|| {
    Lexicon::new(&[
        r"(?i)\b(?:code|algorithm|function|variable|compile|binary)\b",
        r"(?i)\b(?:array|buffer|pointer|stack|heap|memory|cache)\b",
        r"(?i)\b(?:loop|branch|return|parse|token|byte)\b",
        r"(?i)\b(?:server|database|protocol|packet|socket)\b",
        r"(?i)\b(?:class|method|interface|module|library)\b",
        r"\b\w+\.(?:py|rs|cpp|js|ts|go|java)\b",
    ])
});

static ABSTRACT_DOMAIN: LazyLock<Lexicon> = LazyLock::new(|| {
    Lexicon::new(&[
        r"(?i)\b(?:intelligence|consciousness|wisdom|enlightenment)\b",
        r"(?i)\b(?:safety|universality|humanity|civilization)\b",
        r"(?i)\b(?:transcend\w*|infinite|eternal|cosmic|divine)\b",
        r"(?i)\b(?:truth|beauty|justice|freedom|destiny)\b",
        r"(?i)\b(?:paradigm\s+shift|revolution|transformation)\b",
        r"(?i)\b(?:the\s+nature\s+of|the\s+essence\s+of|the\s+meaning\s+of)\b",
    ])
});

static BRIDGES: LazyLock<Lexicon> = LazyLock::new(|| {
    Lexicon::new(&[
        r"(?i)\b(?:therefore|thus|hence|consequently)\b",
        r"(?i)\b(?:step\s+by\s+step|specifically|concretely)\b",
        r"(?i)\b(?:because|since|given\s+that|due\s+to)\b",
        r"(?i)\b(?:this\s+means|which\s+implies|in\s+practice)\b",
        r"(?i)\b(?:for\s+example|such\s+as)\b",
        r"(?i)\bi\.e\.",
    ])
});

/// Detect the first technical → abstract sentence transition with no bridge.
pub fn abstraction_escalation(text: &str) -> Option<ViolationRecord> {
    let sentences = split_sentences(text);

    sentences
        .windows(2)
        .enumerate()
        .find(|(_, pair)| {
            let (from, to) = (pair[0], pair[1]);
            TECHNICAL_DOMAIN.matches(from)
                && ABSTRACT_DOMAIN.matches(to)
                && !BRIDGES.matches(&format!("{from} {to}"))
        })
        .map(|(i, pair)| {
            ViolationRecord::new(
                ConstraintKind::Escalation,
                Severity::Severe,
                Location::SentencePair(i),
            )
            .with_meta("from", preview(pair[0], PREVIEW_CHARS))
            .with_meta("to", preview(pair[1], PREVIEW_CHARS))
            .with_meta("reason", "T->H without bridge")
        })
}
