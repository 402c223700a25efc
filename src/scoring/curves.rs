//! Density derivation and scoring curves
//!
//! Every function here is pure and total: a non-positive denominator yields 0
//! instead of dividing.

use super::standard::{AdequacyRule, FattyAcidRule, ModerationRule};

// ============================================================================
// Densities
// ============================================================================

/// Amount per 1000 kcal
pub fn per_1000_kcal(amount: f64, kcal: f64) -> f64 {
    if kcal > 0.0 {
        amount / (kcal / 1000.0)
    } else {
        0.0
    }
}

/// Amount per kcal (sodium is expressed in mg/kcal)
pub fn per_kcal(amount: f64, kcal: f64) -> f64 {
    if kcal > 0.0 {
        amount / kcal
    } else {
        0.0
    }
}

/// Percent of total energy supplied by `amount` units at `kcal_per_unit`
pub fn percent_of_energy(amount: f64, kcal_per_unit: f64, kcal: f64) -> f64 {
    if kcal > 0.0 {
        100.0 * (amount * kcal_per_unit / kcal)
    } else {
        0.0
    }
}

/// (MUFA + PUFA) / SFA
pub fn fatty_acid_ratio(monopoly: f64, satfat: f64) -> f64 {
    if satfat > 0.0 {
        monopoly / satfat
    } else {
        0.0
    }
}

// ============================================================================
// Scoring Primitives
// ============================================================================

/// Linear from zero up to the threshold, capped at `max_score`
///
/// A density of exactly zero always scores zero.
pub fn score_adequacy(density: f64, rule: &AdequacyRule) -> f64 {
    if density == 0.0 {
        return 0.0;
    }
    let score = rule.max_score * (density / rule.threshold);
    score.min(rule.max_score)
}

/// Full points at or below `min`, none at or above `max`, linear between
pub fn score_moderation(value: f64, rule: &ModerationRule) -> f64 {
    if value <= rule.min {
        rule.max_score
    } else if value >= rule.max {
        0.0
    } else {
        rule.max_score - (rule.max_score * (value - rule.min) / (rule.max - rule.min))
    }
}

/// Fatty acid ratio score
///
/// With no saturated fat the ratio is undefined: any unsaturated fat earns full
/// points, no fat at all earns none.
pub fn score_fatty_acid_ratio(
    monopoly: f64,
    satfat: f64,
    ratio: f64,
    rule: &FattyAcidRule,
) -> f64 {
    if satfat == 0.0 && monopoly == 0.0 {
        0.0
    } else if satfat == 0.0 && monopoly > 0.0 {
        rule.max_score
    } else if ratio >= rule.max {
        rule.max_score
    } else if ratio <= rule.min {
        0.0
    } else {
        rule.max_score * (ratio - rule.min) / (rule.max - rule.min)
    }
}
