//! Bounded teaching loop: audit, correct, rewrite, re-audit.
//!
//! ```text
//! for i in 0..=MAX_ITERATIONS:
//!     report = audit(text, "{sample_id}_iter{i}")
//!     PASS                   -> Passed
//!     no rewriter            -> ExternalHandoff
//!     i == MAX_ITERATIONS    -> HaltedMaxIter
//!     candidate = rewrite(text, corrections(report))
//!     (the prompt states the guard's limit, fixed by the initial length)
//!     candidate too long     -> HaltedExpansion   (text stays unchanged)
//!     text = candidate
//! ```
//!
//! All state is local to one call. Harness and rewriter errors propagate
//! unchanged and abort the loop.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{Gate, ViolationRecord};
use crate::harness::{AuditHarness, CorrectionVector, Report, Rewriter};
use crate::obs::{
    emit_expansion_blocked, emit_loop_finished, emit_loop_iteration, emit_loop_started, LoopSpan,
};
use crate::operators::text::char_len;

/// Rewrites attempted before the loop halts.
pub const MAX_ITERATIONS: u32 = 2;

/// Texts at or below this length (chars) are exempt from the expansion guard.
pub const EXPANSION_FLOOR: usize = 500;

/// Candidate length limit as a percentage of the initial text length.
pub const EXPANSION_LIMIT_PERCENT: usize = 120;

/// How the loop terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoopOutcome {
    /// The current text passed the gate.
    Passed,
    /// No rewriter was supplied; corrections are left to the caller.
    ExternalHandoff,
    /// Still not passing after the last permitted rewrite.
    HaltedMaxIter,
    /// A candidate rewrite exceeded the expansion limit and was discarded.
    HaltedExpansion,
    /// The iteration range ran out without a terminal branch.
    Exhausted,
}

impl LoopOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            LoopOutcome::Passed => "PASSED",
            LoopOutcome::ExternalHandoff => "EXTERNAL_HANDOFF",
            LoopOutcome::HaltedMaxIter => "HALTED_MAX_ITER",
            LoopOutcome::HaltedExpansion => "HALTED_EXPANSION",
            LoopOutcome::Exhausted => "EXHAUSTED",
        }
    }

    /// Whether the loop stopped on a safety bound rather than a verdict.
    pub fn is_halted(self) -> bool {
        matches!(
            self,
            LoopOutcome::HaltedMaxIter | LoopOutcome::HaltedExpansion | LoopOutcome::Exhausted
        )
    }
}

impl fmt::Display for LoopOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one audit pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    pub iteration: u32,
    pub gate: Gate,
    pub score: f64,
    pub violations: Vec<ViolationRecord>,
    pub corrections: Vec<CorrectionVector>,
    pub rewrite_prompt: String,
    /// Length in chars of the audited text.
    pub text_length: usize,
    /// Hex SHA-256 of the audited text.
    pub text_digest: String,
}

impl IterationRecord {
    fn capture(iteration: u32, report: Report, text: &str) -> Self {
        Self {
            iteration,
            gate: report.gate,
            score: report.overall_score,
            violations: report.violations,
            corrections: report.corrections,
            rewrite_prompt: report.rewrite_prompt,
            text_length: char_len(text),
            text_digest: hex::encode(Sha256::digest(text.as_bytes())),
        }
    }
}

/// Full record of one teaching-loop run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopResult {
    pub sample_id: String,
    pub outcome: LoopOutcome,
    pub initial_gate: Gate,
    pub initial_score: f64,
    pub final_gate: Gate,
    pub final_score: f64,
    /// Index of the terminating iteration.
    pub iterations_used: u32,
    pub iterations: Vec<IterationRecord>,
    pub halted: bool,
    /// A candidate rewrite was rejected by the expansion guard.
    pub expansion_blocked: bool,
    pub external_handoff: bool,
    /// `final_score - initial_score`, rounded to 4 decimals.
    pub delta_score: f64,
    /// `final violations - initial violations`.
    pub delta_violations: i64,
    pub final_text: String,
    pub timestamp: DateTime<Utc>,
}

impl LoopResult {
    fn from_trace(
        sample_id: &str,
        outcome: LoopOutcome,
        iterations_used: u32,
        iterations: Vec<IterationRecord>,
        final_text: String,
    ) -> Self {
        // An empty trace only arises if no audit ran; report it as FAIL at 0.
        let (initial_gate, initial_score, initial_count) = iterations
            .first()
            .map_or((Gate::Fail, 0.0, 0), |r| (r.gate, r.score, r.violations.len()));
        let (final_gate, final_score, final_count) = iterations
            .last()
            .map_or((Gate::Fail, 0.0, 0), |r| (r.gate, r.score, r.violations.len()));

        Self {
            sample_id: sample_id.to_string(),
            outcome,
            initial_gate,
            initial_score,
            final_gate,
            final_score,
            iterations_used,
            iterations,
            halted: outcome.is_halted(),
            expansion_blocked: outcome == LoopOutcome::HaltedExpansion,
            external_handoff: outcome == LoopOutcome::ExternalHandoff,
            delta_score: round4(final_score - initial_score),
            delta_violations: final_count as i64 - initial_count as i64,
            final_text,
            timestamp: Utc::now(),
        }
    }

    /// One-line human summary.
    pub fn summary_line(&self) -> String {
        format!(
            "{} | {}({:.2}) -> {}({:.2}) | delta={:+.3} | iters={} | {}",
            self.sample_id,
            self.initial_gate,
            self.initial_score,
            self.final_gate,
            self.final_score,
            self.delta_score,
            self.iterations_used,
            self.outcome,
        )
    }
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// Whether a candidate of `candidate_len` chars must be rejected for a text
/// that started at `initial_len` chars.
pub fn exceeds_expansion_limit(initial_len: usize, candidate_len: usize) -> bool {
    initial_len > EXPANSION_FLOOR
        && candidate_len * 100 > initial_len * EXPANSION_LIMIT_PERCENT
}

/// Largest candidate length (chars) the expansion guard accepts for a text
/// that started at `initial_len` chars. `None` when the guard does not apply.
pub fn length_budget(initial_len: usize) -> Option<usize> {
    (initial_len > EXPANSION_FLOOR).then(|| initial_len * EXPANSION_LIMIT_PERCENT / 100)
}

/// Drive `harness` and `rewriter` over `text` until a terminal state.
///
/// Without a rewriter the loop audits once and hands off. The expansion guard
/// always compares against the length of the initial `text`.
pub fn run_teaching_loop<H>(
    text: &str,
    harness: &H,
    mut rewriter: Option<&mut dyn Rewriter<H::Error>>,
    sample_id: &str,
) -> Result<LoopResult, H::Error>
where
    H: AuditHarness + ?Sized,
{
    let _span = LoopSpan::enter(sample_id);
    let initial_length = char_len(text);
    let budget = length_budget(initial_length);
    emit_loop_started(sample_id, initial_length);

    let mut current = text.to_string();
    let mut iterations: Vec<IterationRecord> = Vec::new();

    for i in 0..=MAX_ITERATIONS {
        let report =
            harness.audit_with_budget(&current, &format!("{sample_id}_iter{i}"), budget)?;
        let gate = report.gate;
        emit_loop_iteration(sample_id, i, gate, report.overall_score, report.violations.len());

        let violations = report.violations.clone();
        iterations.push(IterationRecord::capture(i, report, &current));

        if gate == Gate::Pass {
            return Ok(finish(sample_id, LoopOutcome::Passed, i, iterations, current));
        }

        let Some(rewriter) = rewriter.as_deref_mut() else {
            return Ok(finish(sample_id, LoopOutcome::ExternalHandoff, i, iterations, current));
        };

        if i >= MAX_ITERATIONS {
            return Ok(finish(sample_id, LoopOutcome::HaltedMaxIter, i, iterations, current));
        }

        let corrections = harness.generate_corrections(&violations);
        let candidate = rewriter.rewrite(&current, &corrections)?;
        let candidate_length = char_len(&candidate);

        if exceeds_expansion_limit(initial_length, candidate_length) {
            emit_expansion_blocked(sample_id, initial_length, candidate_length);
            return Ok(finish(sample_id, LoopOutcome::HaltedExpansion, i, iterations, current));
        }

        current = candidate;
    }

    let last = u32::try_from(iterations.len().saturating_sub(1)).unwrap_or(MAX_ITERATIONS);
    Ok(finish(sample_id, LoopOutcome::Exhausted, last, iterations, current))
}

fn finish(
    sample_id: &str,
    outcome: LoopOutcome,
    iterations_used: u32,
    iterations: Vec<IterationRecord>,
    final_text: String,
) -> LoopResult {
    let result =
        LoopResult::from_trace(sample_id, outcome, iterations_used, iterations, final_text);
    emit_loop_finished(
        sample_id,
        result.outcome,
        result.iterations_used,
        result.final_gate,
        result.delta_score,
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_guard_exempts_short_texts() {
        assert!(!exceeds_expansion_limit(500, 10_000));
        assert!(!exceeds_expansion_limit(10, 1_000));
    }

    #[test]
    fn expansion_guard_is_strict_at_the_limit() {
        assert!(!exceeds_expansion_limit(600, 720));
        assert!(exceeds_expansion_limit(600, 721));
        assert!(!exceeds_expansion_limit(501, 601));
        assert!(exceeds_expansion_limit(501, 602));
    }

    #[test]
    fn length_budget_is_the_largest_accepted_length() {
        assert_eq!(length_budget(500), None);
        assert_eq!(length_budget(600), Some(720));
        assert_eq!(length_budget(501), Some(601));
        for initial in [501, 537, 600, 999] {
            let budget = length_budget(initial).unwrap();
            assert!(!exceeds_expansion_limit(initial, budget));
            assert!(exceeds_expansion_limit(initial, budget + 1));
        }
    }

    #[test]
    fn outcome_flags() {
        assert!(LoopOutcome::HaltedMaxIter.is_halted());
        assert!(LoopOutcome::HaltedExpansion.is_halted());
        assert!(!LoopOutcome::Passed.is_halted());
        assert!(!LoopOutcome::ExternalHandoff.is_halted());
        assert_eq!(
            serde_json::to_string(&LoopOutcome::HaltedExpansion).unwrap(),
            "\"HALTED_EXPANSION\""
        );
    }

    #[test]
    fn round4_trims_float_noise() {
        assert_eq!(round4(0.7857 - 0.8571), -0.0714);
        assert_eq!(round4(1.0 - 0.7857), 0.2143);
    }
}
