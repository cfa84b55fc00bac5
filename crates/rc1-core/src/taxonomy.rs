//! Taxonomy vector `T(y) = (t_1, ..., t_7)`: violation counts per kind.

use crate::domain::{Taxonomy, ViolationRecord};

/// Count retained violations per kind. Kinds with no record stay 0.
pub fn compute_taxonomy(violations: &[ViolationRecord]) -> Taxonomy {
    let mut taxonomy = Taxonomy::default();
    for record in violations {
        *taxonomy.slot_mut(record.kind) += 1;
    }
    taxonomy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConstraintKind, Location, Severity};

    fn record(kind: ConstraintKind, severity: Severity) -> ViolationRecord {
        ViolationRecord::new(kind, severity, Location::Offset(0))
    }

    #[test]
    fn counts_per_kind() {
        let violations = vec![
            record(ConstraintKind::Metaphor, Severity::Severe),
            record(ConstraintKind::Absolute, Severity::Minor),
            record(ConstraintKind::Absolute, Severity::Severe),
            record(ConstraintKind::Prescriptive, Severity::Minor),
        ];
        let tax = compute_taxonomy(&violations);
        assert_eq!(tax.metaphor, 1);
        assert_eq!(tax.absolute, 2);
        assert_eq!(tax.prescriptive, 1);
        assert_eq!(tax.intent, 0);
        assert_eq!(tax.total(), 4);
    }

    #[test]
    fn empty_violations_give_zero_vector() {
        assert_eq!(compute_taxonomy(&[]), Taxonomy::default());
    }
}
