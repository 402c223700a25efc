//! Healthy Eating Index-2015 (HEI-2015)
//!
//! Scores standardized dietary intake records on the thirteen HEI-2015
//! components and sums them into a total out of 100.

pub mod error;
pub mod models;
pub mod scoring;
pub mod table;

pub use error::{ScoreError, ScoreResult};
pub use models::{ComponentScores, Densities, Hei2015Score, IntakeRecord, ScoredRecord};
pub use scoring::{score, score_intake, score_records, Component, Scorer, ScoringStandard};
pub use table::IntakeColumns;
