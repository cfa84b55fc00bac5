//! Evaluation pipeline: `y -> {score, V, V_max, gate, taxonomy, violations, version}`.
//!
//! Runs all seven operators in declared order, sums severity, scores, gates
//! and aggregates the taxonomy. No probabilistic inference and no state: the
//! same text always yields a bit-identical result.

use crate::domain::EvaluationResult;
use crate::obs::emit_evaluation_completed;
use crate::operators::OPERATORS;
use crate::scoring::{compute_gate, compute_score, V_MAX};
use crate::taxonomy::compute_taxonomy;
use crate::RULESET_VERSION;

/// Evaluate `text` against the RC1 constraint set.
pub fn evaluate(text: &str) -> EvaluationResult {
    let violations: Vec<_> = OPERATORS.iter().filter_map(|op| op.apply(text)).collect();

    let v: u32 = violations.iter().map(|r| r.severity.weight()).sum();
    let score = compute_score(v);
    let gate = compute_gate(score);
    let taxonomy = compute_taxonomy(&violations);

    emit_evaluation_completed(v, score, gate, violations.len());

    EvaluationResult {
        score,
        v,
        v_max: V_MAX,
        gate,
        taxonomy,
        violations,
        version: RULESET_VERSION.to_string(),
    }
}
