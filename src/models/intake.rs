//! Intake record
//!
//! One row of standardized intake quantities (a diet-day or a subject).

use serde::{Deserialize, Serialize};

/// Standardized intake quantities for one record
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntakeRecord {
    pub kcal: f64,
    pub vtotalleg: f64,     // cup-eq, total vegetables plus legumes
    pub vdrkgrleg: f64,     // cup-eq, dark green vegetables plus legumes
    pub f_total: f64,       // cup-eq
    pub fwholefrt: f64,     // cup-eq
    pub g_whole: f64,       // oz-eq
    pub g_refined: f64,     // oz-eq
    pub d_total: f64,       // cup-eq
    pub pfallprotleg: f64,  // oz-eq, including legumes
    pub pfseaplantleg: f64, // oz-eq, seafood and plant protein including legumes
    pub monopoly: f64,      // grams, MUFA + PUFA
    pub satfat: f64,        // grams
    pub sodium: f64,        // milligrams
    pub add_sugars: f64,    // tsp-eq
}

impl IntakeRecord {
    /// Create a new record with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Whether the record carries a usable energy denominator
    pub fn has_energy(&self) -> bool {
        self.kcal > 0.0
    }

    /// Scale every quantity, energy included, by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            kcal: self.kcal * multiplier,
            vtotalleg: self.vtotalleg * multiplier,
            vdrkgrleg: self.vdrkgrleg * multiplier,
            f_total: self.f_total * multiplier,
            fwholefrt: self.fwholefrt * multiplier,
            g_whole: self.g_whole * multiplier,
            g_refined: self.g_refined * multiplier,
            d_total: self.d_total * multiplier,
            pfallprotleg: self.pfallprotleg * multiplier,
            pfseaplantleg: self.pfseaplantleg * multiplier,
            monopoly: self.monopoly * multiplier,
            satfat: self.satfat * multiplier,
            sodium: self.sodium * multiplier,
            add_sugars: self.add_sugars * multiplier,
        }
    }

    /// Add another record's intake to this one
    pub fn add(&self, other: &IntakeRecord) -> Self {
        Self {
            kcal: self.kcal + other.kcal,
            vtotalleg: self.vtotalleg + other.vtotalleg,
            vdrkgrleg: self.vdrkgrleg + other.vdrkgrleg,
            f_total: self.f_total + other.f_total,
            fwholefrt: self.fwholefrt + other.fwholefrt,
            g_whole: self.g_whole + other.g_whole,
            g_refined: self.g_refined + other.g_refined,
            d_total: self.d_total + other.d_total,
            pfallprotleg: self.pfallprotleg + other.pfallprotleg,
            pfseaplantleg: self.pfseaplantleg + other.pfseaplantleg,
            monopoly: self.monopoly + other.monopoly,
            satfat: self.satfat + other.satfat,
            sodium: self.sodium + other.sodium,
            add_sugars: self.add_sugars + other.add_sugars,
        }
    }
}

impl std::ops::Add for IntakeRecord {
    type Output = IntakeRecord;

    fn add(self, other: IntakeRecord) -> IntakeRecord {
        IntakeRecord::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for IntakeRecord {
    type Output = IntakeRecord;

    fn mul(self, multiplier: f64) -> IntakeRecord {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for IntakeRecord {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(IntakeRecord::zero(), |acc, r| acc + r)
    }
}
