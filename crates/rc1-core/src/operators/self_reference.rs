//! SELF: self-referential capability claim.
//!
//! First-person and "the system can/will/guarantees" claims need an epistemic
//! qualifier in the same sentence. The sentence is bounded by the nearest
//! periods, not by a token window.

use std::sync::LazyLock;

use super::lexicon::Lexicon;
use super::text::{char_offset, enclosing_sentence};
use crate::domain::{ConstraintKind, Location, Severity, ViolationRecord};

static SELF_MARKERS: LazyLock<Lexicon> = LazyLock::new(|| {
    Lexicon::new(&[
        r"(?i)\bI\s+(?:can|will|am\s+able\s+to|guarantee)\b",
        r"(?i)\b(?:this\s+system|the\s+system)\s+(?:can|will|guarantees?)\b",
        r"(?i)\bwe\s+(?:can|guarantee|ensure|promise)\b",
        r"(?i)\bmy\s+(?:capabilities?|abilities?|strengths?)\b",
        r"(?i)\bI\s+(?:know|understand|believe)\s+(?:everything|all)\b",
    ])
});

static QUALIFIERS: LazyLock<Lexicon> = LazyLock::new(|| {
    Lexicon::new(&[
        r"(?i)\b(?:approximately|roughly|within\s+limits|under\s+conditions?)\b",
        r"(?i)\b(?:assuming|provided\s+that|given\s+that|if)\b",
        r"(?i)\bin\s+(?:this|the\s+current)\s+(?:context|scope|version)\b",
        r"(?i)\bto\s+(?:some|a\s+certain)\s+(?:extent|degree)\b",
        r"(?i)\b(?:may|might|could|possibly)\b",
        r"(?i)\bas\s+(?:designed|implemented|specified)\b",
    ])
});

/// Detect capability claims made without qualification.
pub fn unqualified_self_reference(text: &str) -> Option<ViolationRecord> {
    let hits = SELF_MARKERS.hits(text);
    if hits.is_empty() {
        return None;
    }

    let unqualified: Vec<_> = hits
        .iter()
        .filter(|hit| !QUALIFIERS.matches(enclosing_sentence(text, hit.start)))
        .collect();
    let severity = Severity::from_unmitigated(unqualified.len())?;
    let first = unqualified.first()?;

    Some(
        ViolationRecord::new(
            ConstraintKind::SelfReference,
            severity,
            Location::Offset(char_offset(text, first.start)),
        )
        .with_meta("self_refs", hits.len())
        .with_meta("unqualified", unqualified.len())
        .with_meta("sample", first.text),
    )
}
