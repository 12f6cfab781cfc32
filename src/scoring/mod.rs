pub mod classifier;
pub mod engine;
pub mod error;
pub mod table;
pub mod validation;

pub use classifier::{classify, format_probability, ChartRow, Classification, RiskCategory, ScoreBand};
pub use engine::{evaluate, Evaluation, FactorContribution};
pub use error::ScoringError;
pub use table::{RiskFactor, ScoreTable, ScoreVariant, Selection};
pub use validation::validate_table;
