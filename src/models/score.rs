//! Scored output
//!
//! Intermediate values and component scores, serialized under the column names
//! downstream HEI-2015 reporting expects.

use serde::{Deserialize, Serialize};

use crate::scoring::Component;

/// Output column names in canonical order
pub const COLUMN_NAMES: [&str; 27] = [
    "VEGDEN",
    "GRBNDEN",
    "FRTDEN",
    "WHFRDEN",
    "WGRNDEN",
    "DAIRYDEN",
    "PROTDEN",
    "SEAPLDEN",
    "SODDEN",
    "RGDEN",
    "FARATIO",
    "SFAT_PERC",
    "ADDSUG_PERC",
    "HEI2015C1_TOTALVEG",
    "HEI2015C2_GREEN_AND_BEAN",
    "HEI2015C3_TOTALFRUIT",
    "HEI2015C4_WHOLEFRUIT",
    "HEI2015C5_WHOLEGRAIN",
    "HEI2015C6_TOTALDAIRY",
    "HEI2015C7_TOTPROT",
    "HEI2015C8_SEAPLANT_PROT",
    "HEI2015C9_FATTYACID",
    "HEI2015C10_SODIUM",
    "HEI2015C11_REFINEDGRAIN",
    "HEI2015C12_SFAT",
    "HEI2015C13_ADDSUG",
    "HEI2015_TOTAL_SCORE",
];

/// Densities, fatty acid ratio and energy percentages for one record
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Densities {
    #[serde(rename = "VEGDEN")]
    pub total_vegetables: f64,
    #[serde(rename = "GRBNDEN")]
    pub greens_and_beans: f64,
    #[serde(rename = "FRTDEN")]
    pub total_fruit: f64,
    #[serde(rename = "WHFRDEN")]
    pub whole_fruit: f64,
    #[serde(rename = "WGRNDEN")]
    pub whole_grains: f64,
    #[serde(rename = "DAIRYDEN")]
    pub total_dairy: f64,
    #[serde(rename = "PROTDEN")]
    pub total_protein: f64,
    #[serde(rename = "SEAPLDEN")]
    pub seafood_plant_protein: f64,
    #[serde(rename = "SODDEN")]
    pub sodium: f64, // mg per kcal
    #[serde(rename = "RGDEN")]
    pub refined_grains: f64,
    #[serde(rename = "FARATIO")]
    pub fatty_acid_ratio: f64,
    #[serde(rename = "SFAT_PERC")]
    pub saturated_fat_pct: f64,
    #[serde(rename = "ADDSUG_PERC")]
    pub added_sugars_pct: f64,
}

impl Densities {
    /// Values in `COLUMN_NAMES` order
    pub fn values(&self) -> [f64; 13] {
        [
            self.total_vegetables,
            self.greens_and_beans,
            self.total_fruit,
            self.whole_fruit,
            self.whole_grains,
            self.total_dairy,
            self.total_protein,
            self.seafood_plant_protein,
            self.sodium,
            self.refined_grains,
            self.fatty_acid_ratio,
            self.saturated_fat_pct,
            self.added_sugars_pct,
        ]
    }
}

/// The thirteen component scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    #[serde(rename = "HEI2015C1_TOTALVEG")]
    pub total_vegetables: f64,
    #[serde(rename = "HEI2015C2_GREEN_AND_BEAN")]
    pub greens_and_beans: f64,
    #[serde(rename = "HEI2015C3_TOTALFRUIT")]
    pub total_fruit: f64,
    #[serde(rename = "HEI2015C4_WHOLEFRUIT")]
    pub whole_fruit: f64,
    #[serde(rename = "HEI2015C5_WHOLEGRAIN")]
    pub whole_grains: f64,
    #[serde(rename = "HEI2015C6_TOTALDAIRY")]
    pub total_dairy: f64,
    #[serde(rename = "HEI2015C7_TOTPROT")]
    pub total_protein: f64,
    #[serde(rename = "HEI2015C8_SEAPLANT_PROT")]
    pub seafood_plant_protein: f64,
    #[serde(rename = "HEI2015C9_FATTYACID")]
    pub fatty_acids: f64,
    #[serde(rename = "HEI2015C10_SODIUM")]
    pub sodium: f64,
    #[serde(rename = "HEI2015C11_REFINEDGRAIN")]
    pub refined_grains: f64,
    #[serde(rename = "HEI2015C12_SFAT")]
    pub saturated_fat: f64,
    #[serde(rename = "HEI2015C13_ADDSUG")]
    pub added_sugars: f64,
}

impl ComponentScores {
    /// Score of a single component
    pub fn get(&self, component: Component) -> f64 {
        match component {
            Component::TotalVegetables => self.total_vegetables,
            Component::GreensAndBeans => self.greens_and_beans,
            Component::TotalFruit => self.total_fruit,
            Component::WholeFruit => self.whole_fruit,
            Component::WholeGrains => self.whole_grains,
            Component::TotalDairy => self.total_dairy,
            Component::TotalProtein => self.total_protein,
            Component::SeafoodPlantProtein => self.seafood_plant_protein,
            Component::FattyAcids => self.fatty_acids,
            Component::Sodium => self.sodium,
            Component::RefinedGrains => self.refined_grains,
            Component::SaturatedFat => self.saturated_fat,
            Component::AddedSugars => self.added_sugars,
        }
    }

    /// Scores paired with their component, C1..C13
    pub fn iter(&self) -> impl Iterator<Item = (Component, f64)> + '_ {
        Component::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Unweighted sum, accumulated in C1..C13 order
    pub fn total(&self) -> f64 {
        self.iter().map(|(_, score)| score).sum()
    }
}

/// Full HEI-2015 result for one record
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Hei2015Score {
    #[serde(flatten)]
    pub densities: Densities,
    #[serde(flatten)]
    pub components: ComponentScores,
    #[serde(rename = "HEI2015_TOTAL_SCORE")]
    pub total: f64,
}

impl Hei2015Score {
    /// Build a result, deriving the total from the components
    pub fn new(densities: Densities, components: ComponentScores) -> Self {
        Self {
            densities,
            components,
            total: components.total(),
        }
    }

    /// Every derived column as `(name, value)`, in `COLUMN_NAMES` order
    pub fn columns(&self) -> Vec<(&'static str, f64)> {
        let values = self
            .densities
            .values()
            .into_iter()
            .chain(self.components.iter().map(|(_, score)| score))
            .chain(std::iter::once(self.total));

        COLUMN_NAMES.iter().copied().zip(values).collect()
    }
}

/// An input record carried through scoring alongside its derived columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord<R> {
    #[serde(flatten)]
    pub record: R,
    #[serde(flatten)]
    pub score: Hei2015Score,
}

impl<R> ScoredRecord<R> {
    pub fn total(&self) -> f64 {
        self.score.total
    }
}
