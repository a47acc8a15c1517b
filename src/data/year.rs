//! Year values and the file names they resolve to.

use std::fmt;

/// Text used wherever an integer could not be coerced.
pub const NA: &str = "NA";

/// Coerce free-form text to an integer.
///
/// Surrounding whitespace is ignored and decimals are truncated toward zero.
/// Anything else (including non-finite numbers) yields `None`.
pub(crate) fn coerce_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(v);
    }
    let v = trimmed.parse::<f64>().ok().filter(|v| v.is_finite())?.trunc();
    if v < i64::MIN as f64 || v > i64::MAX as f64 {
        return None;
    }
    Some(v as i64)
}

/// A requested year.
///
/// Keeps the caller's original text as the label used in output tables,
/// alongside the coerced integer used for file lookup. Non-numeric input
/// is accepted and coerces to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Year {
    label: String,
    value: Option<i32>,
}

impl Year {
    pub fn parse(raw: impl Into<String>) -> Self {
        let label = raw.into();
        let value = coerce_integer(&label).and_then(|v| i32::try_from(v).ok());
        Self { label, value }
    }

    /// The caller's original text.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> Option<i32> {
        self.value
    }

    /// `accident_<year>.csv.bz2`, with `NA` standing in for an unparsable year.
    pub fn filename(&self) -> String {
        match self.value {
            Some(v) => format!("accident_{v}.csv.bz2"),
            None => format!("accident_{NA}.csv.bz2"),
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl From<i32> for Year {
    fn from(v: i32) -> Self {
        Self {
            label: v.to_string(),
            value: Some(v),
        }
    }
}

impl From<&str> for Year {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for Year {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

impl From<&Year> for Year {
    fn from(year: &Year) -> Self {
        year.clone()
    }
}

/// Map a year to the name of its data file. No existence check is made.
pub fn resolve_filename(year: impl Into<Year>) -> String {
    year.into().filename()
}
