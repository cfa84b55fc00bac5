//! RC1 constraint engine.
//!
//! Deterministic scoring of natural-language text against seven structural
//! constraints, plus a bounded teaching loop that drives an external audit
//! harness and rewriter toward a passing gate.

pub mod domain;
pub mod engine;
pub mod harness;
pub mod invariants;
pub mod obs;
pub mod operators;
pub mod scoring;
pub mod taxonomy;
pub mod teaching_loop;
pub mod telemetry;

/// Version tag stamped on every evaluation result.
pub const RULESET_VERSION: &str = "RC1-2026-03-25";

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use domain::{
    ConstraintKind, EvaluationResult, Gate, Location, Rc1Error, Result, Severity, Taxonomy,
    ViolationRecord,
};

pub use engine::evaluate;
pub use harness::{
    build_rewrite_prompt, generate_corrections, AuditHarness, CorrectionAction, CorrectionVector,
    Rc1Harness, Report, Rewriter, ScriptedRewriter,
};
pub use invariants::{
    check_invariants, load_corpus, InvariantCheck, InvariantFailure, InvariantReport, Sample,
    CI_SAMPLES,
};
pub use operators::{ConstraintOperator, OPERATORS};
pub use scoring::{
    compute_gate, compute_score, N_CONSTRAINTS, PASS_THRESHOLD, V_MAX, WARN_THRESHOLD,
};
pub use taxonomy::compute_taxonomy;
pub use telemetry::init_tracing;
pub use teaching_loop::{
    exceeds_expansion_limit, length_budget, run_teaching_loop, IterationRecord, LoopOutcome,
    LoopResult, EXPANSION_FLOOR, EXPANSION_LIMIT_PERCENT, MAX_ITERATIONS,
};
