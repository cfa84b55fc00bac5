//! INTENT: intent without mechanism.
//!
//! Plans and intent verbs ("we will", "the goal is", "deploy") need a concrete
//! mechanism within ±15 tokens: a code-like token, a conditional, a test or a
//! success criterion, or a measured unit.

use std::sync::LazyLock;

use super::lexicon::Lexicon;
use super::text::{char_offset, TokenWindow};
use crate::domain::{ConstraintKind, Location, Severity, ViolationRecord};

pub const WINDOW: TokenWindow = TokenWindow::new(15, 7);

static INTENT_MARKERS: LazyLock<Lexicon> = LazyLock::new(|| {
    Lexicon::new(&[
        r"(?i)\b(?:deploy|execute|automate|implement)\b",
        r"(?i)\bwe\s+(?:should|could|will|need\s+to|plan\s+to)\b",
        r"(?i)\bthe\s+(?:goal|plan|idea|vision|strategy)\s+is\b",
        r"(?i)\b(?:propose|suggest|recommend|intend)\b",
        r"(?i)\b(?:step\s+\d+|phase\s+\d+)\b",
    ])
});

static MECHANISM_MARKERS: LazyLock<Lexicon> = LazyLock::new(|| {
    Lexicon::new(&[
        r"(?i)\b(?:def|class|function|fn|func|struct)\s+\w+",
        r"\b\w+\.(?:py|rs|cpp|js|ts|go|java|sh|sql|json|yaml|toml)\b",
        r"`[^`]+\([^)]*\)`",
        r"(?i)\b(?:if|when|unless|while)\s+\w+",
        r"(?i)\bfor\s+\w+\s+in\b",
        r"(?i)\b(?:returns?\s+\w+|raises?\s+\w+|outputs?\s+\w+)\b",
        r"(?i)\b(?:test_\w+|assert|expect|verify|validate)\b",
        r"(?i)\b(?:done\s+when|complete\s+when|exit\s+(?:if|when))\b",
        r"(?i)\b(?:success\s+criteria|acceptance\s+criteria|pass\s+if)\b",
        r"\b\d+\.?\d*\s*(?:%|ms|bytes?|Hz|MB|GB|KB)\b",
    ])
});

/// Detect intent statements with no mechanism anywhere near them.
pub fn unbacked_intent(text: &str) -> Option<ViolationRecord> {
    let hits = INTENT_MARKERS.hits(text);
    let first = hits.first()?;

    let backed = hits
        .iter()
        .any(|hit| MECHANISM_MARKERS.matches(WINDOW.around(text, hit.start)));
    if backed {
        return None;
    }

    Some(
        ViolationRecord::new(
            ConstraintKind::Intent,
            Severity::Severe,
            Location::Offset(char_offset(text, first.start)),
        )
        .with_meta("intents", hits.len())
        .with_meta("backed", false)
        .with_meta("sample", first.text),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_code_has_no_intent() {
        assert!(unbacked_intent("def compute(x): return x * 2").is_none());
    }

    #[test]
    fn plan_without_mechanism_is_severe() {
        let text = "We should build a framework for processing data. The plan is to create a pipeline architecture.";
        let record = unbacked_intent(text).unwrap();
        assert_eq!(record.severity, Severity::Severe);
        assert_eq!(record.location, Location::Offset(0));
        assert_eq!(record.metadata["intents"], 2);
    }

    #[test]
    fn plan_with_code_reference_is_backed() {
        let text = "We should implement parser in parser.py. Step 1: def parse(input_str): return tokenize(input_str)";
        assert!(unbacked_intent(text).is_none());
    }

    #[test]
    fn deploy_into_abstraction_is_unbacked() {
        let record = unbacked_intent("We deploy intelligence into humanity.").unwrap();
        assert_eq!(record.location, Location::Offset(3));
        assert_eq!(record.meta_str("sample"), Some("deploy"));
    }
}
