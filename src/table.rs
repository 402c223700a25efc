//! Column-oriented intake input
//!
//! Fourteen numeric columns aligned by row index with a table of records.

use std::collections::BTreeMap;

use crate::error::{ScoreError, ScoreResult};
use crate::models::IntakeRecord;

/// Input column names, matching the `IntakeRecord` field names
pub const INPUT_COLUMNS: [&str; 14] = [
    "kcal",
    "vtotalleg",
    "vdrkgrleg",
    "f_total",
    "fwholefrt",
    "g_whole",
    "d_total",
    "pfallprotleg",
    "pfseaplantleg",
    "monopoly",
    "satfat",
    "sodium",
    "g_refined",
    "add_sugars",
];

/// Borrowed intake columns
#[derive(Debug, Clone, Copy)]
pub struct IntakeColumns<'a> {
    pub kcal: &'a [f64],
    pub v_total: &'a [f64],
    pub v_dark_green: &'a [f64],
    pub f_total: &'a [f64],
    pub f_whole: &'a [f64],
    pub g_whole: &'a [f64],
    pub d_total: &'a [f64],
    pub pf_all: &'a [f64],
    pub pf_sea_plant: &'a [f64],
    pub fat_mono_poly: &'a [f64],
    pub fat_sat: &'a [f64],
    pub sodium: &'a [f64],
    pub g_refined: &'a [f64],
    pub added_sugars: &'a [f64],
}

impl<'a> IntakeColumns<'a> {
    /// Look up every column by name in a named-column table
    pub fn from_named(table: &'a BTreeMap<String, Vec<f64>>) -> ScoreResult<Self> {
        let column = |name: &str| -> ScoreResult<&'a [f64]> {
            table
                .get(name)
                .map(Vec::as_slice)
                .ok_or_else(|| ScoreError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            kcal: column("kcal")?,
            v_total: column("vtotalleg")?,
            v_dark_green: column("vdrkgrleg")?,
            f_total: column("f_total")?,
            f_whole: column("fwholefrt")?,
            g_whole: column("g_whole")?,
            d_total: column("d_total")?,
            pf_all: column("pfallprotleg")?,
            pf_sea_plant: column("pfseaplantleg")?,
            fat_mono_poly: column("monopoly")?,
            fat_sat: column("satfat")?,
            sodium: column("sodium")?,
            g_refined: column("g_refined")?,
            added_sugars: column("add_sugars")?,
        })
    }

    fn named(&self) -> [(&'static str, &'a [f64]); 14] {
        [
            ("kcal", self.kcal),
            ("vtotalleg", self.v_total),
            ("vdrkgrleg", self.v_dark_green),
            ("f_total", self.f_total),
            ("fwholefrt", self.f_whole),
            ("g_whole", self.g_whole),
            ("d_total", self.d_total),
            ("pfallprotleg", self.pf_all),
            ("pfseaplantleg", self.pf_sea_plant),
            ("monopoly", self.fat_mono_poly),
            ("satfat", self.fat_sat),
            ("sodium", self.sodium),
            ("g_refined", self.g_refined),
            ("add_sugars", self.added_sugars),
        ]
    }

    /// Fail on the first column whose length is not `expected`
    pub fn validate_len(&self, expected: usize) -> ScoreResult<()> {
        match self
            .named()
            .into_iter()
            .find(|(_, values)| values.len() != expected)
        {
            Some((column, values)) => Err(ScoreError::ColumnLengthMismatch {
                column,
                expected,
                actual: values.len(),
            }),
            None => Ok(()),
        }
    }

    /// Number of rows, taken from the energy column
    pub fn len(&self) -> usize {
        self.kcal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kcal.is_empty()
    }

    /// Materialize one row; `None` if any column is too short
    pub fn row(&self, index: usize) -> Option<IntakeRecord> {
        Some(IntakeRecord {
            kcal: *self.kcal.get(index)?,
            vtotalleg: *self.v_total.get(index)?,
            vdrkgrleg: *self.v_dark_green.get(index)?,
            f_total: *self.f_total.get(index)?,
            fwholefrt: *self.f_whole.get(index)?,
            g_whole: *self.g_whole.get(index)?,
            g_refined: *self.g_refined.get(index)?,
            d_total: *self.d_total.get(index)?,
            pfallprotleg: *self.pf_all.get(index)?,
            pfseaplantleg: *self.pf_sea_plant.get(index)?,
            monopoly: *self.fat_mono_poly.get(index)?,
            satfat: *self.fat_sat.get(index)?,
            sodium: *self.sodium.get(index)?,
            add_sugars: *self.added_sugars.get(index)?,
        })
    }

    /// Iterate rows up to the shortest column
    pub fn rows(&self) -> impl Iterator<Item = IntakeRecord> + '_ {
        (0..).map_while(move |index| self.row(index))
    }
}
