//! V/V_max scoring and gating.
//!
//! ```text
//! V      = Σ severity over all retained violations
//! V_max  = 2n   (n = number of operators)
//! S(y)   = 1 - V / V_max, rounded to 4 decimals (half away from zero)
//! gate   = PASS if S >= 0.70, WARN if 0.50 <= S < 0.70, FAIL otherwise
//! ```
//!
//! Thresholds are version-locked constants.

use crate::domain::{ConstraintKind, Gate, Severity};

/// Number of constraint operators.
pub const N_CONSTRAINTS: usize = ConstraintKind::COUNT;

/// Maximum severity sum.
pub const V_MAX: u32 = Severity::MAX * N_CONSTRAINTS as u32;

const _: () = assert!(V_MAX == 14, "V_MAX must stay 2 × 7 for RC1-2026-03-25");

pub const PASS_THRESHOLD: f64 = 0.70;
pub const WARN_THRESHOLD: f64 = 0.50;

/// Decimal places kept in the score.
const SCALE: u64 = 10_000;

/// `S = 1 - V / V_max`, rounded to 4 decimals.
///
/// Computed in integers so that equal inputs give bit-identical floats and the
/// rounding mode is exact: `round((V_max - V) * 10^4 / V_max)` with halves
/// rounded away from zero. `v` above `V_max` saturates to 0.0.
pub fn compute_score(v: u32) -> f64 {
    let remaining = u64::from(V_MAX.saturating_sub(v));
    let numerator = remaining * SCALE;
    let denominator = u64::from(V_MAX);
    let mut scaled = numerator / denominator;
    if 2 * (numerator % denominator) >= denominator {
        scaled += 1;
    }
    scaled as f64 / SCALE as f64
}

/// Gate for a score.
pub fn compute_gate(score: f64) -> Gate {
    if score >= PASS_THRESHOLD {
        Gate::Pass
    } else if score >= WARN_THRESHOLD {
        Gate::Warn
    } else {
        Gate::Fail
    }
}
