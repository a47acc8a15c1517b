//! Data module - yearly file loading and summaries

mod loader;
mod processor;
mod year;

pub(crate) use year::coerce_integer;

pub use loader::{RecordLoader, MONTH_COL, YEAR_COL};
pub use processor::Summarizer;
pub use year::{resolve_filename, Year, NA};
