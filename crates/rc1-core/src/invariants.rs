//! Arithmetic-drift checks over a sample corpus.
//!
//! Every sample is evaluated twice and the results are checked against the
//! scoring formula independently of [`crate::scoring`].

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Gate, Rc1Error, Result};
use crate::engine::evaluate;
use crate::obs::emit_invariants_checked;

/// Built-in CI corpus.
pub const CI_SAMPLES: [&str; 5] = [
    "This function computes a parameter under defined conditions.",
    "This system guarantees perfect safety.",
    "We deploy intelligence into humanity.",
    "This function always returns exactly 32 bytes because the SHA3-256 specification mandates a fixed 256-bit output.",
    "",
];

/// One text to check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub id: String,
    pub text: String,
}

impl Sample {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// [`CI_SAMPLES`] with ids `sample_0` .. `sample_4`.
    pub fn builtin() -> Vec<Sample> {
        CI_SAMPLES
            .iter()
            .enumerate()
            .map(|(i, text)| Sample::new(format!("sample_{i}"), *text))
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CorpusEntry {
    Text(String),
    Sample(Sample),
}

/// Load a JSON corpus: an array of strings or of `{"id", "text"}` objects.
/// Bare strings get positional ids.
pub fn load_corpus(path: &Path) -> Result<Vec<Sample>> {
    let raw = std::fs::read_to_string(path)?;
    let entries: Vec<CorpusEntry> = serde_json::from_str(&raw)?;
    if entries.is_empty() {
        return Err(Rc1Error::EmptyCorpus(path.display().to_string()));
    }
    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| match entry {
            CorpusEntry::Text(text) => Sample::new(format!("sample_{i}"), text),
            CorpusEntry::Sample(sample) => sample,
        })
        .collect())
}

/// Which invariant a sample broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvariantCheck {
    SeveritySum,
    ScoreFormula,
    GateThreshold,
    Idempotence,
    VMax,
    TaxonomyTotal,
}

impl InvariantCheck {
    pub const ALL: [InvariantCheck; 6] = [
        InvariantCheck::SeveritySum,
        InvariantCheck::ScoreFormula,
        InvariantCheck::GateThreshold,
        InvariantCheck::Idempotence,
        InvariantCheck::VMax,
        InvariantCheck::TaxonomyTotal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InvariantCheck::SeveritySum => "severity_sum",
            InvariantCheck::ScoreFormula => "score_formula",
            InvariantCheck::GateThreshold => "gate_threshold",
            InvariantCheck::Idempotence => "idempotence",
            InvariantCheck::VMax => "v_max",
            InvariantCheck::TaxonomyTotal => "taxonomy_total",
        }
    }
}

impl fmt::Display for InvariantCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvariantFailure {
    pub sample_id: String,
    pub check: InvariantCheck,
    pub detail: String,
}

impl fmt::Display for InvariantFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.sample_id, self.check, self.detail)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvariantReport {
    pub samples_checked: usize,
    pub failures: Vec<InvariantFailure>,
}

impl InvariantReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

fn expected_gate(score: f64) -> Gate {
    if score >= 0.70 {
        Gate::Pass
    } else if score >= 0.50 {
        Gate::Warn
    } else {
        Gate::Fail
    }
}

/// Check every sample and collect all failures.
pub fn check_invariants(samples: &[Sample]) -> InvariantReport {
    let mut failures = Vec::new();

    for sample in samples {
        let mut fail = |check: InvariantCheck, detail: String| {
            failures.push(InvariantFailure {
                sample_id: sample.id.clone(),
                check,
                detail,
            });
        };

        let result = evaluate(&sample.text);

        let severity_sum = result.severity_sum();
        if result.v != severity_sum {
            fail(
                InvariantCheck::SeveritySum,
                format!("V={} != sum(severity)={severity_sum}", result.v),
            );
        }

        let expected_score = ((1.0 - f64::from(result.v) / 14.0) * 10_000.0).round() / 10_000.0;
        if result.score != expected_score {
            fail(
                InvariantCheck::ScoreFormula,
                format!("score={} != expected={expected_score}", result.score),
            );
        }

        let gate = expected_gate(result.score);
        if result.gate != gate {
            fail(
                InvariantCheck::GateThreshold,
                format!("gate={} != expected={gate}", result.gate),
            );
        }

        if evaluate(&sample.text) != result {
            fail(
                InvariantCheck::Idempotence,
                "second evaluation differs from the first".to_string(),
            );
        }

        if result.v_max != 14 {
            fail(InvariantCheck::VMax, format!("V_max={} != 14", result.v_max));
        }

        let total = result.taxonomy.total();
        if total as usize != result.violations.len() {
            fail(
                InvariantCheck::TaxonomyTotal,
                format!("taxonomy total={total} != violations={}", result.violations.len()),
            );
        }
    }

    emit_invariants_checked(samples.len(), failures.len());

    InvariantReport {
        samples_checked: samples.len(),
        failures,
    }
}
