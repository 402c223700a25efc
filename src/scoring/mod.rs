//! Scoring module
//!
//! Component definitions, scoring curves and the scorer that applies them.

pub mod curves;
pub mod scorer;
pub mod standard;

pub use curves::{score_adequacy, score_fatty_acid_ratio, score_moderation};
pub use scorer::{derive_densities, score, score_intake, score_records, Scorer};
pub use standard::{
    AdequacyRule, Component, ComponentRule, FattyAcidRule, ModerationRule, ScoringStandard,
};
