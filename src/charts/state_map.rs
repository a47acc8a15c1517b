//! State Map Module
//! Selects one state's accidents for a year and prepares them for plotting.

use polars::prelude::*;
use std::fmt;
use std::ops::Range;
use tracing::{debug, info};

use crate::charts::renderer::{MapRenderer, PngMapRenderer};
use crate::config::FarsConfig;
use crate::data::{coerce_integer, RecordLoader, Year, NA};
use crate::error::{Error, Result};

pub const STATE_COL: &str = "STATE";
pub const LATITUDE_COL: &str = "LATITUDE";
pub const LONGITUDE_COL: &str = "LONGITUD";

// FARS codes unknown positions with out-of-range values (e.g. 999.9999).
const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 900.0;

/// Smallest span (degrees) an axis is given when all points share a value.
const MIN_SPAN: f64 = 1.0;

/// A requested state code, `None` when the input was not numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateCode(Option<i64>);

impl StateCode {
    pub fn parse(raw: &str) -> Self {
        Self(coerce_integer(raw))
    }

    pub fn value(&self) -> Option<i64> {
        self.0
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => f.write_str(NA),
        }
    }
}

impl From<i64> for StateCode {
    fn from(v: i64) -> Self {
        Self(Some(v))
    }
}

impl From<i32> for StateCode {
    fn from(v: i32) -> Self {
        Self(Some(i64::from(v)))
    }
}

impl From<&str> for StateCode {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// Longitude/latitude extent of the known coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl MapBounds {
    /// Ranges over the known values of each axis independently. `None` if
    /// either axis has no known value at all.
    pub fn from_coordinates<L, A>(lons: L, lats: A) -> Option<Self>
    where
        L: IntoIterator<Item = Option<f64>>,
        A: IntoIterator<Item = Option<f64>>,
    {
        let (min_lon, max_lon) = Self::range(lons)?;
        let (min_lat, max_lat) = Self::range(lats)?;
        Some(Self {
            min_lon,
            max_lon,
            min_lat,
            max_lat,
        })
    }

    fn range(values: impl IntoIterator<Item = Option<f64>>) -> Option<(f64, f64)> {
        values
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Axis ranges for drawing, widened so a single point is still framed.
    pub fn padded(&self) -> (Range<f64>, Range<f64>) {
        (
            Self::pad(self.min_lon, self.max_lon),
            Self::pad(self.min_lat, self.max_lat),
        )
    }

    fn pad(lo: f64, hi: f64) -> Range<f64> {
        let span = hi - lo;
        if span < MIN_SPAN {
            let extra = (MIN_SPAN - span) / 2.0;
            (lo - extra)..(hi + extra)
        } else {
            let extra = span * 0.05;
            (lo - extra)..(hi + extra)
        }
    }
}

/// Everything needed to draw one state/year map.
#[derive(Debug, Clone, PartialEq)]
pub struct StateMap {
    pub state: i64,
    /// Year label as requested.
    pub year: String,
    pub bounds: MapBounds,
    /// `(longitude, latitude)` of each accident with both coordinates known.
    pub points: Vec<(f64, f64)>,
}

impl StateMap {
    /// Build from records whose coordinates were already cleaned.
    /// Returns `None` when there is no known coordinate to frame.
    pub fn from_records(state: i64, year: &Year, records: &DataFrame) -> Result<Option<Self>> {
        let lons = records.column(LONGITUDE_COL)?.f64()?;
        let lats = records.column(LATITUDE_COL)?.f64()?;

        let Some(bounds) = MapBounds::from_coordinates(lons, lats) else {
            return Ok(None);
        };
        let points = lons
            .into_iter()
            .zip(lats)
            .filter_map(|(lon, lat)| Some((lon?, lat?)))
            .collect();

        Ok(Some(Self {
            state,
            year: year.label().to_string(),
            bounds,
            points,
        }))
    }
}

/// What [`StateMapper::map_state`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapOutcome {
    /// A map was drawn with this many points.
    Rendered { points: usize },
    /// The state had no accidents that year.
    NoAccidents,
    /// Accidents exist but none has a known position.
    NoKnownCoordinates,
}

/// Replace sentinel coordinates with null and cast both to Float64.
pub fn clean_coordinates(records: DataFrame) -> Result<DataFrame> {
    let cleaned = records
        .lazy()
        .with_columns([
            sentinel_to_null(LONGITUDE_COL, MAX_LONGITUDE),
            sentinel_to_null(LATITUDE_COL, MAX_LATITUDE),
        ])
        .collect()?;
    Ok(cleaned)
}

fn sentinel_to_null(name: &str, max: f64) -> Expr {
    let value = col(name).cast(DataType::Float64);
    when(value.clone().gt(lit(max)))
        .then(lit(NULL).cast(DataType::Float64))
        .otherwise(value)
        .alias(name)
}

/// Draws accident locations for a single state and year.
pub struct StateMapper<R> {
    loader: RecordLoader,
    renderer: R,
}

impl StateMapper<PngMapRenderer> {
    /// Loader and PNG renderer as described by `config`.
    pub fn from_config(config: &FarsConfig) -> Self {
        Self::new(
            RecordLoader::new(&config.data_dir),
            PngMapRenderer::new(config.map.clone()),
        )
    }
}

impl<R: MapRenderer> StateMapper<R> {
    pub fn new(loader: RecordLoader, renderer: R) -> Self {
        Self { loader, renderer }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Load `year` in full and map the accidents of `state`.
    ///
    /// Fails with [`Error::MissingFile`] if the year has no file and with
    /// [`Error::InvalidState`] if `state` never occurs in its `STATE` column.
    pub fn map_state(
        &mut self,
        state: impl Into<StateCode>,
        year: impl Into<Year>,
    ) -> Result<MapOutcome> {
        let year = year.into();
        let records = self.loader.load_records(&year.filename())?;
        let state = Self::validate_state(&records, state.into())?;

        let selected = records
            .lazy()
            .filter(col(STATE_COL).cast(DataType::Int64).eq(lit(state)))
            .collect()?;
        self.plot_selection(state, &year, selected)
    }

    fn validate_state(records: &DataFrame, state: StateCode) -> Result<i64> {
        let invalid = || Error::InvalidState {
            state: state.to_string(),
        };
        let code = state.value().ok_or_else(invalid)?;

        let states = records.column(STATE_COL)?.cast(&DataType::Int64)?;
        if states.i64()?.into_iter().any(|s| s == Some(code)) {
            Ok(code)
        } else {
            Err(invalid())
        }
    }

    fn plot_selection(
        &mut self,
        state: i64,
        year: &Year,
        selected: DataFrame,
    ) -> Result<MapOutcome> {
        if selected.height() == 0 {
            info!(state, year = %year, "no accidents to plot");
            return Ok(MapOutcome::NoAccidents);
        }

        let cleaned = clean_coordinates(selected)?;
        let Some(map) = StateMap::from_records(state, year, &cleaned)? else {
            info!(state, year = %year, "no accidents with known coordinates to plot");
            return Ok(MapOutcome::NoKnownCoordinates);
        };

        debug!(state, year = %year, points = map.points.len(), "rendering state map");
        self.renderer.render(&map)?;
        Ok(MapOutcome::Rendered {
            points: map.points.len(),
        })
    }
}
