//! Evaluation verdicts: gate, taxonomy vector and the full result record.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::violation::{ConstraintKind, ViolationRecord};

/// Three-way verdict derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gate {
    Pass,
    Warn,
    Fail,
}

impl Gate {
    pub fn as_str(self) -> &'static str {
        match self {
            Gate::Pass => "PASS",
            Gate::Warn => "WARN",
            Gate::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind violation counts for a single evaluation.
///
/// Keys serialize in the fixed order `H2, ABS, INTENT, ESC, LOOP, PRESC, SELF`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    #[serde(rename = "H2")]
    pub metaphor: u32,
    #[serde(rename = "ABS")]
    pub absolute: u32,
    #[serde(rename = "INTENT")]
    pub intent: u32,
    #[serde(rename = "ESC")]
    pub escalation: u32,
    #[serde(rename = "LOOP")]
    pub repetition: u32,
    #[serde(rename = "PRESC")]
    pub prescriptive: u32,
    #[serde(rename = "SELF")]
    pub self_reference: u32,
}

impl Taxonomy {
    /// Count recorded for `kind`.
    pub fn count(&self, kind: ConstraintKind) -> u32 {
        match kind {
            ConstraintKind::Metaphor => self.metaphor,
            ConstraintKind::Absolute => self.absolute,
            ConstraintKind::Intent => self.intent,
            ConstraintKind::Escalation => self.escalation,
            ConstraintKind::Loop => self.repetition,
            ConstraintKind::Prescriptive => self.prescriptive,
            ConstraintKind::SelfReference => self.self_reference,
        }
    }

    pub(crate) fn slot_mut(&mut self, kind: ConstraintKind) -> &mut u32 {
        match kind {
            ConstraintKind::Metaphor => &mut self.metaphor,
            ConstraintKind::Absolute => &mut self.absolute,
            ConstraintKind::Intent => &mut self.intent,
            ConstraintKind::Escalation => &mut self.escalation,
            ConstraintKind::Loop => &mut self.repetition,
            ConstraintKind::Prescriptive => &mut self.prescriptive,
            ConstraintKind::SelfReference => &mut self.self_reference,
        }
    }

    /// `(kind, count)` pairs in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = (ConstraintKind, u32)> + '_ {
        ConstraintKind::ALL.iter().map(move |&k| (k, self.count(k)))
    }

    /// Sum of all counts.
    pub fn total(&self) -> u32 {
        self.iter().map(|(_, c)| c).sum()
    }
}

/// Output of one evaluation call. Immutable; no caching, no identity.
///
/// # Invariants
///
/// - `v == violations.iter().map(|r| r.severity.weight()).sum()`
/// - `score == round(1 - v / v_max, 4)`
/// - `gate` is a pure function of `score`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub score: f64,
    #[serde(rename = "V")]
    pub v: u32,
    #[serde(rename = "V_max")]
    pub v_max: u32,
    pub gate: Gate,
    pub taxonomy: Taxonomy,
    pub violations: Vec<ViolationRecord>,
    pub version: String,
}

impl EvaluationResult {
    pub fn passed(&self) -> bool {
        self.gate == Gate::Pass
    }

    /// Severity sum recomputed from the retained records.
    pub fn severity_sum(&self) -> u32 {
        self.violations.iter().map(|r| r.severity.weight()).sum()
    }

    /// The record emitted by `kind`, if that operator fired.
    pub fn violation(&self, kind: ConstraintKind) -> Option<&ViolationRecord> {
        self.violations.iter().find(|r| r.kind == kind)
    }
}
