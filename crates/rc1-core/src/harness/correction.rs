//! Correction vectors and structured rewrite prompts.
//!
//! Feedback to a rewriter is structured: one vector per violation with a fixed
//! action and instruction, never free prose.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{ConstraintKind, Location, Severity, ViolationRecord};
use crate::teaching_loop::EXPANSION_LIMIT_PERCENT;
use crate::RULESET_VERSION;

/// What a rewrite must do to clear one violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionAction {
    DissolveMetaphor,
    ScopeClaim,
    BindMechanism,
    InsertBridge,
    CollapseRepetition,
    GroundPrescription,
    QualifyCapability,
}

impl CorrectionAction {
    /// The action that clears a violation of `kind`.
    pub fn for_kind(kind: ConstraintKind) -> Self {
        match kind {
            ConstraintKind::Metaphor => CorrectionAction::DissolveMetaphor,
            ConstraintKind::Absolute => CorrectionAction::ScopeClaim,
            ConstraintKind::Intent => CorrectionAction::BindMechanism,
            ConstraintKind::Escalation => CorrectionAction::InsertBridge,
            ConstraintKind::Loop => CorrectionAction::CollapseRepetition,
            ConstraintKind::Prescriptive => CorrectionAction::GroundPrescription,
            ConstraintKind::SelfReference => CorrectionAction::QualifyCapability,
        }
    }

    /// Serialized name.
    pub fn as_str(self) -> &'static str {
        match self {
            CorrectionAction::DissolveMetaphor => "dissolve_metaphor",
            CorrectionAction::ScopeClaim => "scope_claim",
            CorrectionAction::BindMechanism => "bind_mechanism",
            CorrectionAction::InsertBridge => "insert_bridge",
            CorrectionAction::CollapseRepetition => "collapse_repetition",
            CorrectionAction::GroundPrescription => "ground_prescription",
            CorrectionAction::QualifyCapability => "qualify_capability",
        }
    }

    /// Fixed instruction template.
    pub fn instruction(self) -> &'static str {
        match self {
            CorrectionAction::DissolveMetaphor => {
                "Replace the figurative phrase with its literal meaning, or follow it with an explicit rephrasing (\"i.e.\", \"meaning\")."
            }
            CorrectionAction::ScopeClaim => {
                "Bound the absolute claim with its condition, version, measurement or citation, or drop the absolute quantifier."
            }
            CorrectionAction::BindMechanism => {
                "Name the mechanism that carries out the intent: function, file, condition or success criterion."
            }
            CorrectionAction::InsertBridge => {
                "Insert the explicit reasoning step between the technical statement and the abstract conclusion, or delete the conclusion."
            }
            CorrectionAction::CollapseRepetition => {
                "Delete the restated sentence and keep a single formulation."
            }
            CorrectionAction::GroundPrescription => {
                "State the cause, condition or reference that makes the obligation necessary, or restate it as a description."
            }
            CorrectionAction::QualifyCapability => {
                "Qualify the capability claim with its conditions or scope, or remove it."
            }
        }
    }
}

impl fmt::Display for CorrectionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured correction derived from one violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionVector {
    #[serde(rename = "type")]
    pub kind: ConstraintKind,
    pub severity: Severity,
    pub location: Location,
    pub action: CorrectionAction,
    pub instruction: String,
    /// The offending phrase or sentence, when the operator recorded one.
    pub evidence: Option<String>,
}

impl CorrectionVector {
    pub fn from_violation(record: &ViolationRecord) -> Self {
        let action = CorrectionAction::for_kind(record.kind);
        let evidence = record
            .meta_str("sample")
            .or_else(|| record.meta_str("from"))
            .map(str::to_string);
        Self {
            kind: record.kind,
            severity: record.severity,
            location: record.location,
            action,
            instruction: action.instruction().to_string(),
            evidence,
        }
    }
}

/// One correction vector per violation, in violation order.
pub fn generate_corrections(violations: &[ViolationRecord]) -> Vec<CorrectionVector> {
    violations.iter().map(CorrectionVector::from_violation).collect()
}

/// Render the structured rewrite instruction block for `text`.
///
/// `budget` is the expansion guard's limit in chars, measured against the
/// text the loop started from (see [`crate::teaching_loop::length_budget`]).
/// `None` means no length limit is enforced.
pub fn build_rewrite_prompt(
    text: &str,
    corrections: &[CorrectionVector],
    budget: Option<usize>,
) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!("RC1 CORRECTION ({RULESET_VERSION})\n"));
    prompt.push_str("Apply every correction below. Trim; do not add claims, abstractions or sections.\n");
    match budget {
        Some(budget) => prompt.push_str(&format!(
            "Length budget: at most {budget} characters ({EXPANSION_LIMIT_PERCENT}% of the original text).\n"
        )),
        None => prompt.push_str("Length budget: none enforced; do not lengthen the text.\n"),
    }
    prompt.push_str("\nCORRECTIONS:\n");
    for (i, c) in corrections.iter().enumerate() {
        prompt.push_str(&format!(
            "{}. [{}] severity={} at {}: {} {}",
            i + 1,
            c.kind,
            c.severity.weight(),
            c.location,
            c.action,
            c.instruction,
        ));
        if let Some(evidence) = &c.evidence {
            prompt.push_str(&format!(" (evidence: {evidence:?})"));
        }
        prompt.push('\n');
    }
    prompt.push_str("\nTEXT:\n<<<\n");
    prompt.push_str(text);
    prompt.push_str("\n>>>\n");
    prompt
}
