//! HEI-2015 scorer
//!
//! Derives densities for each record, maps the component rules over them and
//! sums the result. Rows are scored independently and the input is never
//! modified.

use crate::error::ScoreResult;
use crate::models::{ComponentScores, Densities, Hei2015Score, IntakeRecord, ScoredRecord};
use crate::table::IntakeColumns;

use super::curves::{
    fatty_acid_ratio, per_1000_kcal, per_kcal, percent_of_energy, score_adequacy,
    score_fatty_acid_ratio, score_moderation,
};
use super::standard::{ScoringStandard, KCAL_PER_G_FAT, KCAL_PER_TSP_ADDED_SUGAR};

/// Scores intake records against a validated standard
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    standard: ScoringStandard,
}

impl Scorer {
    /// Create a scorer, rejecting an unusable standard up front
    pub fn new(standard: ScoringStandard) -> ScoreResult<Self> {
        standard.validate()?;
        Ok(Self { standard })
    }

    pub fn standard(&self) -> &ScoringStandard {
        &self.standard
    }

    /// Score a single record
    ///
    /// A record without positive energy intake scores zero on every component.
    pub fn score_intake(&self, intake: &IntakeRecord) -> Hei2015Score {
        let densities = derive_densities(intake);
        if !intake.has_energy() {
            return Hei2015Score::new(densities, ComponentScores::default());
        }

        let rules = &self.standard;
        let components = ComponentScores {
            total_vegetables: score_adequacy(densities.total_vegetables, &rules.total_vegetables),
            greens_and_beans: score_adequacy(densities.greens_and_beans, &rules.greens_and_beans),
            total_fruit: score_adequacy(densities.total_fruit, &rules.total_fruit),
            whole_fruit: score_adequacy(densities.whole_fruit, &rules.whole_fruit),
            whole_grains: score_adequacy(densities.whole_grains, &rules.whole_grains),
            total_dairy: score_adequacy(densities.total_dairy, &rules.total_dairy),
            total_protein: score_adequacy(densities.total_protein, &rules.total_protein),
            seafood_plant_protein: score_adequacy(
                densities.seafood_plant_protein,
                &rules.seafood_plant_protein,
            ),
            fatty_acids: score_fatty_acid_ratio(
                intake.monopoly,
                intake.satfat,
                densities.fatty_acid_ratio,
                &rules.fatty_acids,
            ),
            sodium: score_moderation(densities.sodium, &rules.sodium),
            refined_grains: score_moderation(densities.refined_grains, &rules.refined_grains),
            saturated_fat: score_moderation(densities.saturated_fat_pct, &rules.saturated_fat),
            added_sugars: score_moderation(densities.added_sugars_pct, &rules.added_sugars),
        };

        Hei2015Score::new(densities, components)
    }

    /// Score a table made of intake records
    pub fn score_records(&self, records: &[IntakeRecord]) -> Vec<ScoredRecord<IntakeRecord>> {
        log_batch(records.iter());

        records
            .iter()
            .map(|record| ScoredRecord {
                record: *record,
                score: self.score_intake(record),
            })
            .collect()
    }

    /// Score a table of arbitrary records against row-aligned intake columns
    ///
    /// Every column must have one value per record; a mismatch is rejected before
    /// any row is scored.
    pub fn score<R: Clone>(
        &self,
        records: &[R],
        columns: &IntakeColumns<'_>,
    ) -> ScoreResult<Vec<ScoredRecord<R>>> {
        columns.validate_len(records.len())?;

        let intakes: Vec<IntakeRecord> = columns.rows().collect();
        log_batch(intakes.iter());

        Ok(records
            .iter()
            .zip(&intakes)
            .map(|(record, intake)| ScoredRecord {
                record: record.clone(),
                score: self.score_intake(intake),
            })
            .collect())
    }
}

/// Densities, fatty acid ratio and energy percentages for a record
pub fn derive_densities(intake: &IntakeRecord) -> Densities {
    let kcal = intake.kcal;
    Densities {
        total_vegetables: per_1000_kcal(intake.vtotalleg, kcal),
        greens_and_beans: per_1000_kcal(intake.vdrkgrleg, kcal),
        total_fruit: per_1000_kcal(intake.f_total, kcal),
        whole_fruit: per_1000_kcal(intake.fwholefrt, kcal),
        whole_grains: per_1000_kcal(intake.g_whole, kcal),
        total_dairy: per_1000_kcal(intake.d_total, kcal),
        total_protein: per_1000_kcal(intake.pfallprotleg, kcal),
        seafood_plant_protein: per_1000_kcal(intake.pfseaplantleg, kcal),
        sodium: per_kcal(intake.sodium, kcal),
        refined_grains: per_1000_kcal(intake.g_refined, kcal),
        fatty_acid_ratio: fatty_acid_ratio(intake.monopoly, intake.satfat),
        saturated_fat_pct: percent_of_energy(intake.satfat, KCAL_PER_G_FAT, kcal),
        added_sugars_pct: percent_of_energy(intake.add_sugars, KCAL_PER_TSP_ADDED_SUGAR, kcal),
    }
}

fn log_batch<'a>(intakes: impl Iterator<Item = &'a IntakeRecord>) {
    let (rows, without_energy) = intakes.fold((0usize, 0usize), |(rows, zeroed), intake| {
        (rows + 1, zeroed + usize::from(!intake.has_energy()))
    });

    tracing::debug!(rows, "Scoring HEI-2015 batch");
    if without_energy > 0 {
        tracing::warn!(
            "{} of {} records have no positive energy intake; scoring them as zero",
            without_energy,
            rows
        );
    }
}

/// Score one record against the published HEI-2015 standard
pub fn score_intake(intake: &IntakeRecord) -> Hei2015Score {
    Scorer::default().score_intake(intake)
}

/// Score intake records against the published HEI-2015 standard
pub fn score_records(records: &[IntakeRecord]) -> Vec<ScoredRecord<IntakeRecord>> {
    Scorer::default().score_records(records)
}

/// Score records with row-aligned intake columns against the published standard
pub fn score<R: Clone>(
    records: &[R],
    columns: &IntakeColumns<'_>,
) -> ScoreResult<Vec<ScoredRecord<R>>> {
    Scorer::default().score(records, columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoreError;
    use crate::scoring::Component;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn day(kcal: f64) -> IntakeRecord {
        IntakeRecord {
            kcal,
            ..IntakeRecord::zero()
        }
    }

    /// A 2000 kcal day meeting every standard
    fn ideal_day() -> IntakeRecord {
        IntakeRecord {
            kcal: 2000.0,
            vtotalleg: 3.0,
            vdrkgrleg: 0.6,
            f_total: 2.0,
            fwholefrt: 1.0,
            g_whole: 4.0,
            g_refined: 2.0,
            d_total: 3.0,
            pfallprotleg: 6.0,
            pfseaplantleg: 2.0,
            monopoly: 50.0,
            satfat: 10.0,
            sodium: 2000.0,
            add_sugars: 5.0,
        }
    }

    #[test]
    fn test_vegetables_at_threshold_score_max() {
        let score = score_intake(&IntakeRecord {
            vtotalleg: 2.2,
            ..day(2000.0)
        });
        assert_eq!(score.densities.total_vegetables, 1.1);
        assert_eq!(score.components.total_vegetables, 5.0);
    }

    #[test]
    fn test_no_vegetables_score_zero() {
        let score = score_intake(&day(2000.0));
        assert_eq!(score.densities.total_vegetables, 0.0);
        assert_eq!(score.components.total_vegetables, 0.0);
    }

    #[test]
    fn test_no_fat_scores_zero_fatty_acids() {
        let score = score_intake(&day(2000.0));
        assert_eq!(score.components.fatty_acids, 0.0);
    }

    #[test]
    fn test_unsaturated_fat_only_scores_max_fatty_acids() {
        let score = score_intake(&IntakeRecord {
            monopoly: 5.0,
            ..day(2000.0)
        });
        assert_eq!(score.densities.fatty_acid_ratio, 0.0);
        assert_eq!(score.components.fatty_acids, 10.0);
    }

    #[test]
    fn test_sodium_boundaries() {
        let low = score_intake(&IntakeRecord {
            sodium: 2200.0,
            ..day(2000.0)
        });
        assert_eq!(low.densities.sodium, 1.1);
        assert_eq!(low.components.sodium, 10.0);

        let high = score_intake(&IntakeRecord {
            sodium: 4000.0,
            ..day(2000.0)
        });
        assert_eq!(high.densities.sodium, 2.0);
        assert_eq!(high.components.sodium, 0.0);
    }

    #[test]
    fn test_zero_energy_scores_zero_everywhere() {
        let score = score_intake(&IntakeRecord {
            kcal: 0.0,
            ..ideal_day()
        });

        assert_eq!(score.densities.total_vegetables, 0.0);
        assert_eq!(score.densities.sodium, 0.0);
        assert_eq!(score.densities.saturated_fat_pct, 0.0);
        assert_eq!(score.densities.added_sugars_pct, 0.0);
        for (component, value) in score.components.iter() {
            assert_eq!(value, 0.0, "{} should be zero", component.label());
        }
        assert_eq!(score.total, 0.0);
    }

    #[test]
    fn test_negative_energy_treated_as_missing() {
        let score = score_intake(&IntakeRecord {
            kcal: -250.0,
            ..ideal_day()
        });
        assert_eq!(score.total, 0.0);
    }

    #[test]
    fn test_empty_plate_with_energy_keeps_moderation_points() {
        // Moderation components reward zero intake when energy is known
        let score = score_intake(&day(1800.0));
        assert_eq!(score.components.sodium, 10.0);
        assert_eq!(score.components.refined_grains, 10.0);
        assert_eq!(score.components.saturated_fat, 10.0);
        assert_eq!(score.components.added_sugars, 10.0);
        assert_eq!(score.total, 40.0);
    }

    #[test]
    fn test_ideal_day_scores_100() {
        let score = score_intake(&ideal_day());
        for component in Component::ALL {
            assert_eq!(
                score.components.get(component),
                component.max_points(),
                "{}",
                component.column_name()
            );
        }
        assert_eq!(score.total, 100.0);
    }

    #[test]
    fn test_intermediate_day() {
        let score = score_intake(&IntakeRecord {
            kcal: 2000.0,
            vtotalleg: 1.1,
            monopoly: 18.5,
            satfat: 10.0,
            sodium: 3100.0,
            g_refined: 6.1,
            add_sugars: 20.0,
            ..IntakeRecord::zero()
        });

        assert!(approx(score.components.total_vegetables, 2.5));
        assert!(approx(score.components.fatty_acids, 5.0));
        assert!(approx(score.components.sodium, 5.0));
        // 6.1 oz-eq over 2000 kcal = 3.05 per 1000 kcal
        assert!(approx(score.components.refined_grains, 5.0));
        // 10 g * 9 kcal / 2000 kcal = 4.5%
        assert!(approx(score.densities.saturated_fat_pct, 4.5));
        assert_eq!(score.components.saturated_fat, 10.0);
        // 20 tsp * 16 kcal / 2000 kcal = 16%
        assert!(approx(score.densities.added_sugars_pct, 16.0));
        assert!(approx(score.components.added_sugars, 10.0 - 10.0 * 9.5 / 19.5));
    }

    #[test]
    fn test_custom_standard_changes_scores() {
        let standard = ScoringStandard::from_json_str(
            r#"{"total_vegetables": {"max_score": 5.0, "threshold": 2.2}}"#,
        )
        .unwrap();
        let scorer = Scorer::new(standard).unwrap();

        let score = scorer.score_intake(&IntakeRecord {
            vtotalleg: 2.2,
            ..day(2000.0)
        });
        assert!(approx(score.components.total_vegetables, 2.5));
    }

    #[test]
    fn test_scorer_rejects_invalid_standard() {
        let mut standard = ScoringStandard::default();
        standard.sodium.max = standard.sodium.min;
        assert!(matches!(
            Scorer::new(standard),
            Err(ScoreError::InvalidStandard { component: "sodium", .. })
        ));
    }

    #[test]
    fn test_score_records_preserves_input() {
        let records = vec![ideal_day(), day(0.0), day(2000.0)];
        let scored = score_records(&records);

        assert_eq!(scored.len(), 3);
        for (input, output) in records.iter().zip(&scored) {
            assert_eq!(&output.record, input);
        }
        assert_eq!(scored[0].total(), 100.0);
        assert_eq!(scored[1].total(), 0.0);
        assert_eq!(scored[2].total(), 40.0);
    }

    #[test]
    fn test_score_with_columns_carries_record() {
        let ids = vec!["subject-1", "subject-2"];
        let kcal = [2000.0, 0.0];
        let veg = [2.2, 2.2];
        let zeros = [0.0, 0.0];
        let columns = IntakeColumns {
            kcal: &kcal,
            v_total: &veg,
            v_dark_green: &zeros,
            f_total: &zeros,
            f_whole: &zeros,
            g_whole: &zeros,
            d_total: &zeros,
            pf_all: &zeros,
            pf_sea_plant: &zeros,
            fat_mono_poly: &zeros,
            fat_sat: &zeros,
            sodium: &zeros,
            g_refined: &zeros,
            added_sugars: &zeros,
        };

        let scored = score(&ids, &columns).unwrap();
        assert_eq!(scored[0].record, "subject-1");
        assert_eq!(scored[0].score.components.total_vegetables, 5.0);
        assert_eq!(scored[1].record, "subject-2");
        assert_eq!(scored[1].total(), 0.0);
    }

    #[test]
    fn test_score_rejects_misaligned_columns() {
        let ids = vec![1, 2, 3];
        let three = [2000.0; 3];
        let two = [0.0; 2];
        let columns = IntakeColumns {
            kcal: &three,
            v_total: &three,
            v_dark_green: &three,
            f_total: &three,
            f_whole: &three,
            g_whole: &three,
            d_total: &three,
            pf_all: &three,
            pf_sea_plant: &three,
            fat_mono_poly: &three,
            fat_sat: &two,
            sodium: &three,
            g_refined: &three,
            added_sugars: &three,
        };

        match score(&ids, &columns) {
            Err(ScoreError::ColumnLengthMismatch { column, .. }) => assert_eq!(column, "satfat"),
            other => panic!("expected ColumnLengthMismatch, got {:?}", other),
        }
    }

    fn intake_strategy() -> impl Strategy<Value = IntakeRecord> {
        (
            (
                -500.0f64..5000.0,
                0.0f64..8.0,
                0.0f64..3.0,
                0.0f64..6.0,
                0.0f64..4.0,
                0.0f64..10.0,
                0.0f64..15.0,
            ),
            (
                0.0f64..6.0,
                0.0f64..15.0,
                0.0f64..8.0,
                0.0f64..120.0,
                0.0f64..80.0,
                0.0f64..9000.0,
                0.0f64..40.0,
            ),
        )
            .prop_map(
                |(
                    (kcal, vtotalleg, vdrkgrleg, f_total, fwholefrt, g_whole, g_refined),
                    (d_total, pfallprotleg, pfseaplantleg, monopoly, satfat, sodium, add_sugars),
                )| IntakeRecord {
                    kcal,
                    vtotalleg,
                    vdrkgrleg,
                    f_total,
                    fwholefrt,
                    g_whole,
                    g_refined,
                    d_total,
                    pfallprotleg,
                    pfseaplantleg,
                    monopoly,
                    satfat,
                    sodium,
                    add_sugars,
                },
            )
    }

    proptest! {
        /// Property: every component lies in [0, max] and the total in [0, 100].
        #[test]
        fn scores_within_range(intake in intake_strategy()) {
            let score = score_intake(&intake);
            for (component, value) in score.components.iter() {
                prop_assert!(value >= 0.0, "{} negative: {}", component.key(), value);
                prop_assert!(
                    value <= component.max_points() + 1e-9,
                    "{} above max: {}", component.key(), value
                );
            }
            prop_assert!(score.total >= 0.0 && score.total <= 100.0 + 1e-9);
        }

        /// Property: the total is exactly the sum of the components.
        #[test]
        fn total_decomposes(intake in intake_strategy()) {
            let score = score_intake(&intake);
            let sum: f64 = Component::ALL.iter().map(|c| score.components.get(*c)).sum();
            prop_assert_eq!(score.total, sum);
        }

        /// Property: rows without positive energy score zero throughout.
        #[test]
        fn zero_energy_zeroes_row(intake in intake_strategy(), kcal in -1000.0f64..=0.0) {
            let score = score_intake(&IntakeRecord { kcal, ..intake });
            prop_assert_eq!(score.densities.total_dairy, 0.0);
            prop_assert_eq!(score.densities.sodium, 0.0);
            prop_assert_eq!(score.densities.added_sugars_pct, 0.0);
            prop_assert_eq!(score.components, ComponentScores::default());
            prop_assert_eq!(score.total, 0.0);
        }

        /// Property: scoring is deterministic across repeated runs.
        #[test]
        fn scoring_is_idempotent(intakes in prop::collection::vec(intake_strategy(), 0..20)) {
            let first = score_records(&intakes);
            let second = score_records(&intakes);
            prop_assert_eq!(first, second);
        }

        /// Property: more whole grain never lowers the whole grain score.
        #[test]
        fn whole_grain_monotonic(intake in intake_strategy(), extra in 0.0f64..5.0) {
            let base = score_intake(&intake);
            let more = score_intake(&IntakeRecord { g_whole: intake.g_whole + extra, ..intake });
            prop_assert!(base.components.whole_grains <= more.components.whole_grains);
        }

        /// Property: more sodium never raises the sodium score.
        #[test]
        fn sodium_monotonic(intake in intake_strategy(), extra in 0.0f64..3000.0) {
            let base = score_intake(&intake);
            let more = score_intake(&IntakeRecord { sodium: intake.sodium + extra, ..intake });
            prop_assert!(base.components.sodium + 1e-12 >= more.components.sodium);
        }
    }
}
