//! Violation records produced by the constraint operators.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The seven defect classes audited by RC1, in declared execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// Undissolved metaphor.
    #[serde(rename = "H2")]
    Metaphor,
    /// Absolute claim without scope.
    #[serde(rename = "ABS")]
    Absolute,
    /// Intent without mechanism.
    #[serde(rename = "INTENT")]
    Intent,
    /// Technical → abstract escalation without a bridge.
    #[serde(rename = "ESC")]
    Escalation,
    /// Rephrasing loop between adjacent sentences.
    #[serde(rename = "LOOP")]
    Loop,
    /// Ungrounded prescriptive claim.
    #[serde(rename = "PRESC")]
    Prescriptive,
    /// Unqualified self-referential capability claim.
    #[serde(rename = "SELF")]
    SelfReference,
}

impl ConstraintKind {
    /// Every kind, in the fixed order operators execute and taxonomy keys serialize.
    pub const ALL: [ConstraintKind; 7] = [
        ConstraintKind::Metaphor,
        ConstraintKind::Absolute,
        ConstraintKind::Intent,
        ConstraintKind::Escalation,
        ConstraintKind::Loop,
        ConstraintKind::Prescriptive,
        ConstraintKind::SelfReference,
    ];

    /// Number of constraint kinds.
    pub const COUNT: usize = Self::ALL.len();

    /// Short taxonomy code (`H2`, `ABS`, ...).
    pub fn code(self) -> &'static str {
        match self {
            ConstraintKind::Metaphor => "H2",
            ConstraintKind::Absolute => "ABS",
            ConstraintKind::Intent => "INTENT",
            ConstraintKind::Escalation => "ESC",
            ConstraintKind::Loop => "LOOP",
            ConstraintKind::Prescriptive => "PRESC",
            ConstraintKind::SelfReference => "SELF",
        }
    }

    /// Position of this kind in [`ConstraintKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Severity of a retained violation. A severity of 0 is never materialised:
/// operators return `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Severity {
    Minor,
    Severe,
}

impl Severity {
    /// Largest weight any single operator can contribute.
    pub const MAX: u32 = 2;

    pub fn weight(self) -> u32 {
        match self {
            Severity::Minor => 1,
            Severity::Severe => 2,
        }
    }

    /// Map a count of unmitigated occurrences to a severity:
    /// 0 → none, 1 → minor, more → severe.
    pub fn from_unmitigated(count: usize) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(Severity::Minor),
            _ => Some(Severity::Severe),
        }
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.weight() as u8
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Severity::Minor),
            2 => Ok(Severity::Severe),
            other => Err(format!("severity must be 1 or 2, got {other}")),
        }
    }
}

/// Where a violation was anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Character offset (Unicode scalar values) of the anchoring trigger.
    Offset(usize),
    /// Index `i` of the first offending adjacent sentence pair `(i, i + 1)`.
    SentencePair(usize),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Offset(offset) => write!(f, "char {offset}"),
            Location::SentencePair(index) => write!(f, "sentences {}-{}", index, index + 1),
        }
    }
}

/// One operator's aggregate verdict on one text.
///
/// Each operator yields at most one record per evaluation. Records are built
/// once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolationRecord {
    #[serde(rename = "type")]
    pub kind: ConstraintKind,
    pub severity: Severity,
    pub location: Location,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl ViolationRecord {
    pub fn new(kind: ConstraintKind, severity: Severity, location: Location) -> Self {
        Self {
            kind,
            severity,
            location,
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_meta(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Metadata value as a string slice, when present and textual.
    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_order_and_codes_are_fixed() {
        let codes: Vec<&str> = ConstraintKind::ALL.iter().map(|k| k.code()).collect();
        assert_eq!(codes, ["H2", "ABS", "INTENT", "ESC", "LOOP", "PRESC", "SELF"]);
        for (i, kind) in ConstraintKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn severity_serializes_as_integer() {
        let record = ViolationRecord::new(
            ConstraintKind::Absolute,
            Severity::Severe,
            Location::Offset(12),
        )
        .with_meta("sample", "guarantees");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "ABS");
        assert_eq!(json["severity"], 2);
        assert_eq!(json["location"]["offset"], 12);
        assert_eq!(json["metadata"]["sample"], "guarantees");

        let back: ViolationRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn zero_severity_is_rejected_on_deserialize() {
        let json = serde_json::json!({
            "type": "SELF",
            "severity": 0,
            "location": {"offset": 0},
            "metadata": {}
        });
        assert!(serde_json::from_value::<ViolationRecord>(json).is_err());
    }

    #[test]
    fn unmitigated_count_maps_to_severity() {
        assert_eq!(Severity::from_unmitigated(0), None);
        assert_eq!(Severity::from_unmitigated(1), Some(Severity::Minor));
        assert_eq!(Severity::from_unmitigated(5), Some(Severity::Severe));
    }
}
