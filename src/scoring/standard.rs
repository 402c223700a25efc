//! HEI-2015 components and scoring standards
//!
//! The thirteen components and the parameters of their scoring curves, kept as
//! data so that the scorer maps one set of primitives over a table of rules.

use serde::{Deserialize, Serialize};

use crate::error::{ScoreError, ScoreResult};

// ============================================================================
// Energy Conversion Constants
// ============================================================================

/// Kilocalories per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;
/// Kilocalories per teaspoon-equivalent of added sugar (4 g at 4 kcal/g)
pub const KCAL_PER_TSP_ADDED_SUGAR: f64 = 16.0;

// ============================================================================
// Published HEI-2015 Thresholds
// ============================================================================

/// Fatty acid ratio at or below which the component scores zero
pub const FARMIN: f64 = 1.2;
/// Fatty acid ratio at or above which the component scores maximum
pub const FARMAX: f64 = 2.5;

/// Sodium density (mg/kcal) for maximum score
pub const SODMIN: f64 = 1.1;
/// Sodium density (mg/kcal) for zero score
pub const SODMAX: f64 = 2.0;

/// Refined grain density (oz-eq/1000 kcal) for maximum score
pub const RGMIN: f64 = 1.8;
/// Refined grain density (oz-eq/1000 kcal) for zero score
pub const RGMAX: f64 = 4.3;

/// Saturated fat percent of energy for maximum score
pub const SFATMIN: f64 = 8.0;
/// Saturated fat percent of energy for zero score
pub const SFATMAX: f64 = 16.0;

/// Added sugar percent of energy for maximum score
pub const ADDSUGMIN: f64 = 6.5;
/// Added sugar percent of energy for zero score
pub const ADDSUGMAX: f64 = 26.0;

// ============================================================================
// Components
// ============================================================================

/// One of the thirteen HEI-2015 components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    TotalVegetables,
    GreensAndBeans,
    TotalFruit,
    WholeFruit,
    WholeGrains,
    TotalDairy,
    TotalProtein,
    SeafoodPlantProtein,
    FattyAcids,
    Sodium,
    RefinedGrains,
    SaturatedFat,
    AddedSugars,
}

impl Component {
    /// All components in C1..C13 order
    pub const ALL: [Component; 13] = [
        Component::TotalVegetables,
        Component::GreensAndBeans,
        Component::TotalFruit,
        Component::WholeFruit,
        Component::WholeGrains,
        Component::TotalDairy,
        Component::TotalProtein,
        Component::SeafoodPlantProtein,
        Component::FattyAcids,
        Component::Sodium,
        Component::RefinedGrains,
        Component::SaturatedFat,
        Component::AddedSugars,
    ];

    /// Output column name of the component score
    pub fn column_name(&self) -> &'static str {
        match self {
            Component::TotalVegetables => "HEI2015C1_TOTALVEG",
            Component::GreensAndBeans => "HEI2015C2_GREEN_AND_BEAN",
            Component::TotalFruit => "HEI2015C3_TOTALFRUIT",
            Component::WholeFruit => "HEI2015C4_WHOLEFRUIT",
            Component::WholeGrains => "HEI2015C5_WHOLEGRAIN",
            Component::TotalDairy => "HEI2015C6_TOTALDAIRY",
            Component::TotalProtein => "HEI2015C7_TOTPROT",
            Component::SeafoodPlantProtein => "HEI2015C8_SEAPLANT_PROT",
            Component::FattyAcids => "HEI2015C9_FATTYACID",
            Component::Sodium => "HEI2015C10_SODIUM",
            Component::RefinedGrains => "HEI2015C11_REFINEDGRAIN",
            Component::SaturatedFat => "HEI2015C12_SFAT",
            Component::AddedSugars => "HEI2015C13_ADDSUG",
        }
    }

    /// Key used in scoring standard documents
    pub fn key(&self) -> &'static str {
        match self {
            Component::TotalVegetables => "total_vegetables",
            Component::GreensAndBeans => "greens_and_beans",
            Component::TotalFruit => "total_fruit",
            Component::WholeFruit => "whole_fruit",
            Component::WholeGrains => "whole_grains",
            Component::TotalDairy => "total_dairy",
            Component::TotalProtein => "total_protein",
            Component::SeafoodPlantProtein => "seafood_plant_protein",
            Component::FattyAcids => "fatty_acids",
            Component::Sodium => "sodium",
            Component::RefinedGrains => "refined_grains",
            Component::SaturatedFat => "saturated_fat",
            Component::AddedSugars => "added_sugars",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Component::TotalVegetables => "Total Vegetables",
            Component::GreensAndBeans => "Greens and Beans",
            Component::TotalFruit => "Total Fruits",
            Component::WholeFruit => "Whole Fruits",
            Component::WholeGrains => "Whole Grains",
            Component::TotalDairy => "Dairy",
            Component::TotalProtein => "Total Protein Foods",
            Component::SeafoodPlantProtein => "Seafood and Plant Proteins",
            Component::FattyAcids => "Fatty Acids",
            Component::Sodium => "Sodium",
            Component::RefinedGrains => "Refined Grains",
            Component::SaturatedFat => "Saturated Fats",
            Component::AddedSugars => "Added Sugars",
        }
    }

    /// Parse from a standard key or an output column name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        Self::ALL.into_iter().find(|c| {
            c.key().eq_ignore_ascii_case(trimmed) || c.column_name().eq_ignore_ascii_case(trimmed)
        })
    }

    /// Maximum points under the published HEI-2015 standard
    pub fn max_points(&self) -> f64 {
        ScoringStandard::default().rule(*self).max_score()
    }
}

// ============================================================================
// Rules
// ============================================================================

/// "More-is-better" rule: full points at or above a density threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdequacyRule {
    pub max_score: f64,
    pub threshold: f64,
}

/// "Less-is-better" rule: full points at or below `min`, none at or above `max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModerationRule {
    pub max_score: f64,
    pub min: f64,
    pub max: f64,
}

/// Fatty acid ratio rule: none at or below `min`, full points at or above `max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FattyAcidRule {
    pub max_score: f64,
    pub min: f64,
    pub max: f64,
}

/// Rule of any kind, as looked up per component
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComponentRule {
    Adequacy(AdequacyRule),
    Moderation(ModerationRule),
    FattyAcidRatio(FattyAcidRule),
}

impl ComponentRule {
    pub fn max_score(&self) -> f64 {
        match self {
            ComponentRule::Adequacy(r) => r.max_score,
            ComponentRule::Moderation(r) => r.max_score,
            ComponentRule::FattyAcidRatio(r) => r.max_score,
        }
    }

    fn validate(&self, component: Component) -> ScoreResult<()> {
        let invalid = |reason: String| ScoreError::InvalidStandard {
            component: component.key(),
            reason,
        };

        let max_score = self.max_score();
        if !(max_score.is_finite() && max_score > 0.0) {
            return Err(invalid(format!(
                "max_score must be finite and positive, got {}",
                max_score
            )));
        }

        match self {
            ComponentRule::Adequacy(r) => {
                if !(r.threshold.is_finite() && r.threshold > 0.0) {
                    return Err(invalid(format!(
                        "threshold must be finite and positive, got {}",
                        r.threshold
                    )));
                }
            }
            ComponentRule::Moderation(ModerationRule { min, max, .. })
            | ComponentRule::FattyAcidRatio(FattyAcidRule { min, max, .. }) => {
                if !(min.is_finite() && max.is_finite()) {
                    return Err(invalid(format!("bounds must be finite, got {}..{}", min, max)));
                }
                if min >= max {
                    return Err(invalid(format!("min {} must be below max {}", min, max)));
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// Scoring Standard
// ============================================================================

/// Scoring parameters for every component
///
/// `Default` carries the published HEI-2015 values. Deserializing a partial
/// document overrides only the components it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringStandard {
    #[serde(default = "default_total_vegetables")]
    pub total_vegetables: AdequacyRule,
    #[serde(default = "default_greens_and_beans")]
    pub greens_and_beans: AdequacyRule,
    #[serde(default = "default_total_fruit")]
    pub total_fruit: AdequacyRule,
    #[serde(default = "default_whole_fruit")]
    pub whole_fruit: AdequacyRule,
    #[serde(default = "default_whole_grains")]
    pub whole_grains: AdequacyRule,
    #[serde(default = "default_total_dairy")]
    pub total_dairy: AdequacyRule,
    #[serde(default = "default_total_protein")]
    pub total_protein: AdequacyRule,
    #[serde(default = "default_seafood_plant_protein")]
    pub seafood_plant_protein: AdequacyRule,
    #[serde(default = "default_fatty_acids")]
    pub fatty_acids: FattyAcidRule,
    #[serde(default = "default_sodium")]
    pub sodium: ModerationRule,
    #[serde(default = "default_refined_grains")]
    pub refined_grains: ModerationRule,
    #[serde(default = "default_saturated_fat")]
    pub saturated_fat: ModerationRule,
    #[serde(default = "default_added_sugars")]
    pub added_sugars: ModerationRule,
}

impl Default for ScoringStandard {
    fn default() -> Self {
        Self {
            total_vegetables: default_total_vegetables(),
            greens_and_beans: default_greens_and_beans(),
            total_fruit: default_total_fruit(),
            whole_fruit: default_whole_fruit(),
            whole_grains: default_whole_grains(),
            total_dairy: default_total_dairy(),
            total_protein: default_total_protein(),
            seafood_plant_protein: default_seafood_plant_protein(),
            fatty_acids: default_fatty_acids(),
            sodium: default_sodium(),
            refined_grains: default_refined_grains(),
            saturated_fat: default_saturated_fat(),
            added_sugars: default_added_sugars(),
        }
    }
}

impl ScoringStandard {
    /// Load a standard from JSON; missing components keep HEI-2015 values
    pub fn from_json_str(json: &str) -> ScoreResult<Self> {
        let standard: Self = serde_json::from_str(json)?;
        standard.validate()?;
        Ok(standard)
    }

    /// Look up the rule for a component
    pub fn rule(&self, component: Component) -> ComponentRule {
        match component {
            Component::TotalVegetables => ComponentRule::Adequacy(self.total_vegetables),
            Component::GreensAndBeans => ComponentRule::Adequacy(self.greens_and_beans),
            Component::TotalFruit => ComponentRule::Adequacy(self.total_fruit),
            Component::WholeFruit => ComponentRule::Adequacy(self.whole_fruit),
            Component::WholeGrains => ComponentRule::Adequacy(self.whole_grains),
            Component::TotalDairy => ComponentRule::Adequacy(self.total_dairy),
            Component::TotalProtein => ComponentRule::Adequacy(self.total_protein),
            Component::SeafoodPlantProtein => ComponentRule::Adequacy(self.seafood_plant_protein),
            Component::FattyAcids => ComponentRule::FattyAcidRatio(self.fatty_acids),
            Component::Sodium => ComponentRule::Moderation(self.sodium),
            Component::RefinedGrains => ComponentRule::Moderation(self.refined_grains),
            Component::SaturatedFat => ComponentRule::Moderation(self.saturated_fat),
            Component::AddedSugars => ComponentRule::Moderation(self.added_sugars),
        }
    }

    /// Highest attainable total score
    pub fn max_total(&self) -> f64 {
        Component::ALL
            .iter()
            .map(|c| self.rule(*c).max_score())
            .sum()
    }

    /// Check every rule, failing on the first unusable one
    pub fn validate(&self) -> ScoreResult<()> {
        Component::ALL
            .iter()
            .try_for_each(|c| self.rule(*c).validate(*c))
    }
}

fn adequacy(max_score: f64, threshold: f64) -> AdequacyRule {
    AdequacyRule { max_score, threshold }
}

fn moderation(min: f64, max: f64) -> ModerationRule {
    ModerationRule {
        max_score: 10.0,
        min,
        max,
    }
}

fn default_total_vegetables() -> AdequacyRule {
    adequacy(5.0, 1.1)
}

fn default_greens_and_beans() -> AdequacyRule {
    adequacy(5.0, 0.2)
}

fn default_total_fruit() -> AdequacyRule {
    adequacy(5.0, 0.8)
}

fn default_whole_fruit() -> AdequacyRule {
    adequacy(5.0, 0.4)
}

fn default_whole_grains() -> AdequacyRule {
    adequacy(10.0, 1.5)
}

fn default_total_dairy() -> AdequacyRule {
    adequacy(10.0, 1.3)
}

fn default_total_protein() -> AdequacyRule {
    adequacy(5.0, 2.5)
}

fn default_seafood_plant_protein() -> AdequacyRule {
    adequacy(5.0, 0.8)
}

fn default_fatty_acids() -> FattyAcidRule {
    FattyAcidRule {
        max_score: 10.0,
        min: FARMIN,
        max: FARMAX,
    }
}

fn default_sodium() -> ModerationRule {
    moderation(SODMIN, SODMAX)
}

fn default_refined_grains() -> ModerationRule {
    moderation(RGMIN, RGMAX)
}

fn default_saturated_fat() -> ModerationRule {
    moderation(SFATMIN, SFATMAX)
}

fn default_added_sugars() -> ModerationRule {
    moderation(ADDSUGMIN, ADDSUGMAX)
}
