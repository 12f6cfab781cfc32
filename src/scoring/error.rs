/// Errors raised by the scoring core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    /// One or more selected keys do not name a factor in the catalog.
    #[error("unknown risk factor(s): {}", .0.join(", "))]
    UnknownFactor(Vec<String>),

    /// The classifier was called with a negative total.
    #[error("invalid score {0}: total score cannot be negative")]
    InvalidScore(i64),
}

pub type Result<T> = std::result::Result<T, ScoringError>;
