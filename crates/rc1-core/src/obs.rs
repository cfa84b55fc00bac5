//! Structured observability hooks for evaluation and teaching-loop events.
//!
//! - `LoopSpan` RAII guard scoping all events of one loop run
//! - `emit_*` functions, one per lifecycle event
//!
//! Evaluation events are `debug!` since the loop evaluates on every pass;
//! loop and invariant events are `info!`.

use tracing::{debug, info, warn};

use crate::domain::Gate;
use crate::teaching_loop::LoopOutcome;

/// RAII guard that enters a loop-scoped span for the duration of a run.
///
/// ```ignore
/// let _span = LoopSpan::enter("sample_0");
/// // every event below carries sample_id = "sample_0"
/// ```
pub struct LoopSpan {
    _span: tracing::span::EnteredSpan,
}

impl LoopSpan {
    pub fn enter(sample_id: &str) -> Self {
        let span = tracing::info_span!("rc1.loop", sample_id = %sample_id);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: one text evaluated.
pub fn emit_evaluation_completed(v: u32, score: f64, gate: Gate, violations: usize) {
    debug!(
        event = "evaluation.completed",
        v = v,
        score = score,
        gate = %gate,
        violations = violations,
    );
}

/// Emit event: teaching loop started.
pub fn emit_loop_started(sample_id: &str, text_length: usize) {
    info!(event = "loop.started", sample_id = %sample_id, text_length = text_length);
}

/// Emit event: one audit pass completed.
pub fn emit_loop_iteration(
    sample_id: &str,
    iteration: u32,
    gate: Gate,
    score: f64,
    violations: usize,
) {
    info!(
        event = "loop.iteration",
        sample_id = %sample_id,
        iteration = iteration,
        gate = %gate,
        score = score,
        violations = violations,
    );
}

/// Emit event: candidate rewrite rejected by the expansion guard (warning level).
pub fn emit_expansion_blocked(sample_id: &str, initial_length: usize, candidate_length: usize) {
    warn!(
        event = "loop.expansion_blocked",
        sample_id = %sample_id,
        initial_length = initial_length,
        candidate_length = candidate_length,
    );
}

/// Emit event: teaching loop terminated.
pub fn emit_loop_finished(
    sample_id: &str,
    outcome: LoopOutcome,
    iterations_used: u32,
    final_gate: Gate,
    delta_score: f64,
) {
    info!(
        event = "loop.finished",
        sample_id = %sample_id,
        outcome = %outcome,
        iterations_used = iterations_used,
        final_gate = %final_gate,
        delta_score = delta_score,
    );
}

/// Emit event: invariant check over a corpus completed.
pub fn emit_invariants_checked(samples: usize, failures: usize) {
    info!(
        event = "invariants.checked",
        samples = samples,
        failures = failures,
        passed = failures == 0,
    );
}
