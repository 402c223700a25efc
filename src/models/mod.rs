//! Data models
//!
//! Intake records going in, scored records coming out.

mod intake;
mod score;

pub use intake::IntakeRecord;
pub use score::{ComponentScores, Densities, Hei2015Score, ScoredRecord, COLUMN_NAMES};
