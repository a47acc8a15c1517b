//! Summary Module
//! Combines loaded years and tabulates accident counts by month and year.

use polars::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::data::loader::{RecordLoader, MONTH_COL, YEAR_COL};
use crate::data::year::Year;
use crate::error::Result;

const COUNT_COL: &str = "n";

/// Builds month-by-year count tables.
pub struct Summarizer;

impl Summarizer {
    /// Count accidents per month for each requested year.
    ///
    /// Output columns: `MONTH`, then one column per year label that produced
    /// rows, in request order. Months appear in ascending order; a month with
    /// no accidents in some year is null in that year's column. Years that
    /// fail to load are skipped, so all of them failing gives an empty table.
    pub fn summarize_years<I, Y>(loader: &RecordLoader, years: I) -> Result<DataFrame>
    where
        I: IntoIterator<Item = Y>,
        Y: Into<Year>,
    {
        let years: Vec<Year> = years.into_iter().map(Into::into).collect();
        let frames: Vec<DataFrame> = loader
            .load_years(&years)
            .into_iter()
            .filter_map(|loaded| loaded.ok())
            .collect();

        let Some(combined) = Self::combine(frames)? else {
            return Ok(DataFrame::empty());
        };
        let counts = Self::count_by_year_month(&combined)?;
        Self::pivot_counts(&counts, &years)
    }

    /// Stack projected years into one frame, `None` when there is nothing.
    pub fn combine(frames: Vec<DataFrame>) -> Result<Option<DataFrame>> {
        let mut frames = frames.into_iter();
        let Some(mut combined) = frames.next() else {
            return Ok(None);
        };
        for df in frames {
            combined.vstack_mut(&df)?;
        }
        Ok(Some(combined))
    }

    /// Long-format counts: one row per (`year`, `MONTH`) with column `n`.
    pub fn count_by_year_month(combined: &DataFrame) -> Result<DataFrame> {
        let counts = combined
            .clone()
            .lazy()
            .group_by([col(YEAR_COL), col(MONTH_COL)])
            .agg([len().alias(COUNT_COL)])
            .collect()?;
        Ok(counts)
    }

    /// Widen long counts into `MONTH` rows and per-year columns.
    ///
    /// Rows with a null month or year are dropped.
    pub fn pivot_counts(counts: &DataFrame, years: &[Year]) -> Result<DataFrame> {
        let year_ca = counts.column(YEAR_COL)?.str()?;
        let month_col = counts.column(MONTH_COL)?.cast(&DataType::Int32)?;
        let month_ca = month_col.i32()?;
        let n_col = counts.column(COUNT_COL)?.cast(&DataType::UInt32)?;
        let n_ca = n_col.u32()?;

        let mut cells: BTreeMap<i32, HashMap<String, u32>> = BTreeMap::new();
        let mut present: HashSet<String> = HashSet::new();
        for ((year, month), n) in year_ca.into_iter().zip(month_ca).zip(n_ca) {
            let (Some(year), Some(month), Some(n)) = (year, month, n) else {
                continue;
            };
            cells.entry(month).or_default().insert(year.to_string(), n);
            present.insert(year.to_string());
        }

        let mut labels: Vec<&str> = Vec::new();
        for year in years {
            if present.contains(year.label()) && !labels.contains(&year.label()) {
                labels.push(year.label());
            }
        }

        let months: Vec<i32> = cells.keys().copied().collect();
        let mut columns = vec![Column::new(MONTH_COL.into(), months)];
        for label in labels {
            let values: Vec<Option<u32>> = cells
                .values()
                .map(|by_year| by_year.get(label).copied())
                .collect();
            columns.push(Column::new(label.into(), values));
        }

        Ok(DataFrame::new(columns)?)
    }
}
