//! Audit harness contracts consumed by the teaching loop.
//!
//! - [`AuditHarness`]: text → [`Report`], deterministic for a fixed text
//! - [`Rewriter`]: text + corrections → rewritten text (caller supplied)
//!
//! [`Rc1Harness`] and [`ScriptedRewriter`] are deterministic reference
//! implementations; neither calls a text-generation model.

pub mod correction;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

pub use correction::{
    build_rewrite_prompt, generate_corrections, CorrectionAction, CorrectionVector,
};

use crate::domain::{Gate, Rc1Error, Result, ViolationRecord};
use crate::engine::evaluate;
use crate::operators::text::char_len;
use crate::teaching_loop::length_budget;

/// Output of one audit pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub sample_id: String,
    pub gate: Gate,
    pub overall_score: f64,
    pub violations: Vec<ViolationRecord>,
    pub corrections: Vec<CorrectionVector>,
    pub rewrite_prompt: String,
}

/// External audit/correction cycle driven by the teaching loop.
pub trait AuditHarness {
    type Error;

    /// Audit `text`. Must be deterministic for a fixed text.
    fn audit(&self, text: &str, sample_id: &str) -> std::result::Result<Report, Self::Error>;

    /// Audit `text` inside a loop whose expansion guard allows at most
    /// `budget` chars per candidate. Harnesses that render no prompt can
    /// keep the default, which ignores the budget.
    fn audit_with_budget(
        &self,
        text: &str,
        sample_id: &str,
        _budget: Option<usize>,
    ) -> std::result::Result<Report, Self::Error> {
        self.audit(text, sample_id)
    }

    /// Derive correction vectors from a report's violations.
    fn generate_corrections(&self, violations: &[ViolationRecord]) -> Vec<CorrectionVector> {
        generate_corrections(violations)
    }
}

/// Produces a rewritten text from the current text and its corrections.
pub trait Rewriter<E> {
    fn rewrite(
        &mut self,
        text: &str,
        corrections: &[CorrectionVector],
    ) -> std::result::Result<String, E>;
}

impl<E, F> Rewriter<E> for F
where
    F: FnMut(&str, &[CorrectionVector]) -> std::result::Result<String, E>,
{
    fn rewrite(
        &mut self,
        text: &str,
        corrections: &[CorrectionVector],
    ) -> std::result::Result<String, E> {
        self(text, corrections)
    }
}

/// Reference harness over [`evaluate`].
///
/// Passing texts get no corrections and an empty prompt. A standalone
/// [`AuditHarness::audit`] treats `text` as the loop's initial text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rc1Harness;

impl AuditHarness for Rc1Harness {
    type Error = Rc1Error;

    fn audit(&self, text: &str, sample_id: &str) -> Result<Report> {
        self.audit_with_budget(text, sample_id, length_budget(char_len(text)))
    }

    fn audit_with_budget(
        &self,
        text: &str,
        sample_id: &str,
        budget: Option<usize>,
    ) -> Result<Report> {
        let result = evaluate(text);
        let (corrections, rewrite_prompt) = if result.passed() {
            (Vec::new(), String::new())
        } else {
            let corrections = self.generate_corrections(&result.violations);
            let prompt = build_rewrite_prompt(text, &corrections, budget);
            (corrections, prompt)
        };

        Ok(Report {
            sample_id: sample_id.to_string(),
            gate: result.gate,
            overall_score: result.score,
            violations: result.violations,
            corrections,
            rewrite_prompt,
        })
    }
}

/// Replays a fixed list of candidate rewrites in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRewriter {
    candidates: VecDeque<String>,
    supplied: usize,
}

impl ScriptedRewriter {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidates: VecDeque<String> = candidates.into_iter().map(Into::into).collect();
        let supplied = candidates.len();
        Self {
            candidates,
            supplied,
        }
    }

    /// Candidates not yet handed out.
    pub fn remaining(&self) -> usize {
        self.candidates.len()
    }
}

impl Rewriter<Rc1Error> for ScriptedRewriter {
    fn rewrite(&mut self, _text: &str, _corrections: &[CorrectionVector]) -> Result<String> {
        self.candidates
            .pop_front()
            .ok_or(Rc1Error::RewriteExhausted {
                supplied: self.supplied,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_text_has_no_corrections() {
        let report = Rc1Harness.audit("The function returns 42.", "s").unwrap();
        assert_eq!(report.gate, Gate::Pass);
        assert!(report.corrections.is_empty());
        assert!(report.rewrite_prompt.is_empty());
        assert_eq!(report.sample_id, "s");
    }

    #[test]
    fn scripted_rewriter_replays_then_errors() {
        let mut rewriter = ScriptedRewriter::new(["first", "second"]);
        assert_eq!(rewriter.rewrite("x", &[]).unwrap(), "first");
        assert_eq!(rewriter.remaining(), 1);
        assert_eq!(rewriter.rewrite("x", &[]).unwrap(), "second");
        let err = rewriter.rewrite("x", &[]).unwrap_err();
        assert!(matches!(err, Rc1Error::RewriteExhausted { supplied: 2 }));
    }

    #[test]
    fn closures_are_rewriters() {
        let mut upper = |text: &str, _: &[CorrectionVector]| Ok::<_, Rc1Error>(text.to_uppercase());
        assert_eq!(upper.rewrite("abc", &[]).unwrap(), "ABC");
    }
}
