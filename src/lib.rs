//! FARS - yearly traffic fatality records
//!
//! Loads `accident_<year>.csv.bz2` files, tabulates accidents by month and
//! year, and maps one state's accidents for a year.
//!
//! The free functions below work against the current working directory and
//! default settings. Use [`RecordLoader`], [`Summarizer`] and [`StateMapper`]
//! directly to point at another directory or renderer.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;

#[cfg(test)]
mod fixtures;

use polars::prelude::DataFrame;

pub use charts::{
    MapBounds, MapOutcome, MapRenderer, PngMapRenderer, StateCode, StateMap, StateMapper,
};
pub use config::{FarsConfig, MapConfig};
pub use data::{resolve_filename, RecordLoader, Summarizer, Year};
pub use error::{Error, Result};
pub use logging::{init_logging, Verbosity};

/// Load one file from the working directory.
pub fn load_records(filename: &str) -> Result<DataFrame> {
    RecordLoader::current_dir().load_records(filename)
}

/// Load `MONTH`/`year` projections for each year from the working directory.
pub fn load_years<I, Y>(years: I) -> Vec<Result<DataFrame>>
where
    I: IntoIterator<Item = Y>,
    Y: Into<Year>,
{
    RecordLoader::current_dir().load_years(years)
}

/// Month-by-year accident counts from the working directory.
pub fn summarize_years<I, Y>(years: I) -> Result<DataFrame>
where
    I: IntoIterator<Item = Y>,
    Y: Into<Year>,
{
    Summarizer::summarize_years(&RecordLoader::current_dir(), years)
}

/// Map a state's accidents for a year to the default PNG output.
pub fn map_state(state: impl Into<StateCode>, year: impl Into<Year>) -> Result<MapOutcome> {
    StateMapper::from_config(&FarsConfig::default()).map_state(state, year)
}
