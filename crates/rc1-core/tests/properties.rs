use proptest::prelude::*;
use rc1_core::operators::text::{char_len, split_sentences};
use rc1_core::{
    compute_gate, compute_score, evaluate, exceeds_expansion_limit, run_teaching_loop,
    ConstraintKind, Gate, Location, LoopOutcome, Rc1Harness, ScriptedRewriter, MAX_ITERATIONS,
    V_MAX,
};

const VOCABULARY: &[&str] = &[
    "The", "code", "compiles.", "function", "returns", "42", "bytes", "always", "never",
    "must", "should", "because", "if", "heart", "soul", "dances", "meaning", "I can",
    "This system will", "we will", "deploy", "humanity.", "truth.", "Intelligence",
    "therefore", "cache", "server.", "The parser reads tokens.", "may", "`fn main()`",
    "main.rs", "every", "guarantees", "is the core of", "Therefore,", "i.e.",
];

/// `round(1 - V/14, 4)` in floating point, independent of the integer scorer.
fn expected_score(v: u32) -> f64 {
    ((1.0 - f64::from(v) / 14.0) * 10_000.0).round() / 10_000.0
}

fn expected_gate(score: f64) -> Gate {
    if score >= 0.70 {
        Gate::Pass
    } else if score >= 0.50 {
        Gate::Warn
    } else {
        Gate::Fail
    }
}

fn prose() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 0..80).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn result_invariants_hold_for_arbitrary_text(text in "\\PC{0,300}") {
        let result = evaluate(&text);
        prop_assert_eq!(result.v, result.severity_sum());
        prop_assert!(result.v <= V_MAX);
        prop_assert_eq!(result.score, expected_score(result.v));
        prop_assert_eq!(result.gate, expected_gate(result.score));
        prop_assert_eq!(result.taxonomy.total() as usize, result.violations.len());
    }

    #[test]
    fn result_invariants_hold_for_lexicon_heavy_prose(text in prose()) {
        let result = evaluate(&text);
        prop_assert_eq!(result.v, result.severity_sum());
        prop_assert_eq!(result.score, expected_score(result.v));
        prop_assert!((0.0..=1.0).contains(&result.score));
        prop_assert_eq!(result.gate, expected_gate(result.score));
        for kind in ConstraintKind::ALL {
            prop_assert!(result.taxonomy.count(kind) <= 1);
        }
        prop_assert_eq!(evaluate(&text), result);
    }

    #[test]
    fn locations_point_inside_the_text(text in prose()) {
        let result = evaluate(&text);
        let len = char_len(&text);
        let pairs = split_sentences(&text).len().saturating_sub(1);
        for record in &result.violations {
            match record.location {
                Location::Offset(offset) => prop_assert!(offset < len),
                Location::SentencePair(i) => prop_assert!(i < pairs),
            }
        }
    }

    #[test]
    fn score_never_increases_with_severity(v in 0u32..V_MAX) {
        prop_assert!(compute_score(v + 1) < compute_score(v));
    }

    #[test]
    fn scorer_matches_the_float_formula(v in 0u32..=V_MAX) {
        prop_assert_eq!(compute_score(v), expected_score(v));
        prop_assert_eq!(compute_gate(compute_score(v)), expected_gate(expected_score(v)));
    }

    #[test]
    fn teaching_loop_stays_bounded(
        text in prose(),
        first in prose(),
        second in prose(),
    ) {
        let mut rewriter = ScriptedRewriter::new([first, second]);
        let result = run_teaching_loop(&text, &Rc1Harness, Some(&mut rewriter), "prop").unwrap();

        prop_assert!(result.iterations_used <= MAX_ITERATIONS);
        prop_assert_eq!(result.iterations.len() as u32, result.iterations_used + 1);
        prop_assert_eq!(
            result.halted,
            matches!(result.outcome, LoopOutcome::HaltedMaxIter | LoopOutcome::HaltedExpansion)
        );
        prop_assert!(!result.external_handoff);
        prop_assert!(!exceeds_expansion_limit(char_len(&text), char_len(&result.final_text)));
        if result.outcome == LoopOutcome::Passed {
            prop_assert!(result.final_score >= 0.70);
        }
    }
}
