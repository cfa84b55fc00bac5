//! Domain-level error taxonomy for RC1.
//!
//! Constraint operators and scoring are infallible. Errors only arise at the
//! edges: loading sample corpora from disk and driving a rewriter.

/// RC1 domain errors.
#[derive(Debug, thiserror::Error)]
pub enum Rc1Error {
    #[error("corpus is empty: {0}")]
    EmptyCorpus(String),

    #[error("scripted rewriter exhausted after {supplied} candidate(s)")]
    RewriteExhausted { supplied: usize },

    #[error("rewrite failed: {0}")]
    Rewrite(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for RC1 domain operations.
pub type Result<T> = std::result::Result<T, Rc1Error>;
