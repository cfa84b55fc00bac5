//! The seven RC1 constraint operators.
//!
//! Each operator is a pure, total function `&str -> Option<ViolationRecord>`.
//! `None` means no violation; a record always carries severity 1 or 2. Apart
//! from ESC and LOOP, which compare adjacent sentences, every operator follows
//! the same shape: collect all trigger hits, then look for mitigating language
//! in a window around each hit.

pub mod absolute;
pub mod escalation;
pub mod intent;
pub mod lexicon;
pub mod metaphor;
pub mod prescriptive;
pub mod repetition;
pub mod self_reference;
pub mod text;

pub use absolute::unscoped_absolute;
pub use escalation::abstraction_escalation;
pub use intent::unbacked_intent;
pub use metaphor::undissolved_metaphor;
pub use prescriptive::ungrounded_prescription;
pub use repetition::rephrasing_loop;
pub use self_reference::unqualified_self_reference;

use crate::domain::{ConstraintKind, ViolationRecord};

/// Signature shared by every operator.
pub type OperatorFn = fn(&str) -> Option<ViolationRecord>;

/// An operator bound to the kind it detects.
#[derive(Clone, Copy)]
pub struct ConstraintOperator {
    pub kind: ConstraintKind,
    pub detect: OperatorFn,
}

impl ConstraintOperator {
    /// Run the operator.
    pub fn apply(&self, text: &str) -> Option<ViolationRecord> {
        (self.detect)(text)
    }
}

impl std::fmt::Debug for ConstraintOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintOperator")
            .field("kind", &self.kind)
            .finish()
    }
}

/// The ordered operator set `{C_1, ..., C_7}`.
///
/// The array length is tied to [`ConstraintKind::COUNT`], so adding a kind
/// without an operator (or the reverse) does not compile.
pub const OPERATORS: [ConstraintOperator; ConstraintKind::COUNT] = [
    ConstraintOperator {
        kind: ConstraintKind::Metaphor,
        detect: undissolved_metaphor,
    },
    ConstraintOperator {
        kind: ConstraintKind::Absolute,
        detect: unscoped_absolute,
    },
    ConstraintOperator {
        kind: ConstraintKind::Intent,
        detect: unbacked_intent,
    },
    ConstraintOperator {
        kind: ConstraintKind::Escalation,
        detect: abstraction_escalation,
    },
    ConstraintOperator {
        kind: ConstraintKind::Loop,
        detect: rephrasing_loop,
    },
    ConstraintOperator {
        kind: ConstraintKind::Prescriptive,
        detect: ungrounded_prescription,
    },
    ConstraintOperator {
        kind: ConstraintKind::SelfReference,
        detect: unqualified_self_reference,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_follow_declared_kind_order() {
        for (op, kind) in OPERATORS.iter().zip(ConstraintKind::ALL) {
            assert_eq!(op.kind, kind);
        }
    }

    #[test]
    fn every_operator_is_total_on_empty_text() {
        for op in &OPERATORS {
            assert!(op.apply("").is_none(), "{} fired on empty text", op.kind);
        }
    }

    #[test]
    fn records_carry_their_operator_kind() {
        let text = "The ghost breathes. This always works. We will deploy. \
                    The code compiles. Truth emerges. You must obey. I can do anything.";
        for op in &OPERATORS {
            if let Some(record) = op.apply(text) {
                assert_eq!(record.kind, op.kind);
            }
        }
    }
}
