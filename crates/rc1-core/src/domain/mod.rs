//! Domain models for RC1.
//!
//! Canonical definitions for the core records:
//! - `ViolationRecord`: one operator's aggregate verdict on one text
//! - `EvaluationResult`: score, gate and taxonomy for one text
//! - `Rc1Error`: errors raised at the I/O and rewrite edges

pub mod error;
pub mod evaluation;
pub mod violation;

pub use error::{Rc1Error, Result};
pub use evaluation::{EvaluationResult, Gate, Taxonomy};
pub use violation::{ConstraintKind, Location, Severity, ViolationRecord};
