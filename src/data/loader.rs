//! Accident Record Loader Module
//! Reads yearly FARS files into Polars DataFrames.

use bzip2::read::MultiBzDecoder;
use polars::prelude::*;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::data::year::Year;
use crate::error::{Error, Result};

pub const MONTH_COL: &str = "MONTH";
pub const YEAR_COL: &str = "year";

/// Loads accident files from one base directory.
#[derive(Debug, Clone)]
pub struct RecordLoader {
    data_dir: PathBuf,
}

impl Default for RecordLoader {
    fn default() -> Self {
        Self::current_dir()
    }
}

impl RecordLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolve files against the process working directory at call time.
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load one file as a DataFrame, columns as found in its header row.
    ///
    /// `.bz2` files are decompressed; anything else is read as plain CSV.
    /// Cells that do not fit the inferred column type are read as null.
    pub fn load_records(&self, filename: &str) -> Result<DataFrame> {
        let path = self.data_dir.join(filename);
        if !path.exists() {
            return Err(Error::MissingFile {
                filename: filename.to_string(),
            });
        }

        let bytes = Self::read_bytes(&path)?;
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        debug!(file = %path.display(), rows = df.height(), "loaded records");
        Ok(df)
    }

    fn read_bytes(path: &Path) -> Result<Vec<u8>> {
        let file = File::open(path)?;
        let mut bytes = Vec::new();
        if path.extension().is_some_and(|ext| ext == "bz2") {
            MultiBzDecoder::new(file).read_to_end(&mut bytes)?;
        } else {
            let mut file = file;
            file.read_to_end(&mut bytes)?;
        }
        Ok(bytes)
    }

    /// Load one year reduced to `MONTH` and a `year` column holding the
    /// year's original label.
    pub fn load_year(&self, year: &Year) -> Result<DataFrame> {
        let df = self.load_records(&year.filename())?;
        let projected = df
            .lazy()
            .with_column(lit(year.label()).alias(YEAR_COL))
            .select([col(MONTH_COL).cast(DataType::Int32), col(YEAR_COL)])
            .collect()?;
        Ok(projected)
    }

    /// Load several years, one result per input in input order.
    ///
    /// A failing year is logged and left as an `Err` in its slot; it never
    /// stops the remaining years from loading.
    pub fn load_years<I, Y>(&self, years: I) -> Vec<Result<DataFrame>>
    where
        I: IntoIterator<Item = Y>,
        Y: Into<Year>,
    {
        years
            .into_iter()
            .map(Into::into)
            .map(|year| {
                let result = self.load_year(&year);
                if let Err(err) = &result {
                    warn!(year = %year, error = %err, "invalid year: {year}");
                }
                result
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{write_bz2, write_plain};
    use crate::logging::init_test_logging;
    use tempfile::tempdir;

    const CSV_2013: &str = "STATE,MONTH,DAY,LATITUDE,LONGITUD\n\
                            1,1,3,34.5,-86.1\n\
                            1,1,9,33.1,-87.2\n\
                            6,2,14,36.7,-119.8\n";

    #[test]
    fn test_load_records_missing() {
        let dir = tempdir().unwrap();
        let loader = RecordLoader::new(dir.path());

        let err = loader.load_records("accident_1999.csv.bz2").unwrap_err();
        assert!(err.is_missing_file());
        assert!(err.to_string().contains("accident_1999.csv.bz2"));
    }

    #[test]
    fn test_load_records_bz2() {
        let dir = tempdir().unwrap();
        write_bz2(dir.path(), "accident_2013.csv.bz2", CSV_2013);
        let loader = RecordLoader::new(dir.path());

        let df = loader.load_records("accident_2013.csv.bz2").unwrap();
        assert_eq!(df.height(), 3);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, ["STATE", "MONTH", "DAY", "LATITUDE", "LONGITUD"]);
    }

    #[test]
    fn test_load_records_plain_csv() {
        let dir = tempdir().unwrap();
        write_plain(dir.path(), "extra.csv", "a,b\n1,x\n2,y\n");
        let loader = RecordLoader::new(dir.path());

        let df = loader.load_records("extra.csv").unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn test_load_year_projects_month_and_year() {
        let dir = tempdir().unwrap();
        write_bz2(dir.path(), "accident_2013.csv.bz2", CSV_2013);
        let loader = RecordLoader::new(dir.path());

        let df = loader.load_year(&Year::from(2013)).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, [MONTH_COL, YEAR_COL]);

        let months: Vec<Option<i32>> = df
            .column(MONTH_COL)
            .unwrap()
            .i32()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(months, [Some(1), Some(1), Some(2)]);
    }

    #[test]
    fn test_load_years_isolates_failures() {
        init_test_logging();
        let dir = tempdir().unwrap();
        write_bz2(dir.path(), "accident_2013.csv.bz2", CSV_2013);
        write_bz2(dir.path(), "accident_2014.csv.bz2", "STATE,DAY\n1,2\n");
        let loader = RecordLoader::new(dir.path());

        let results = loader.load_years(["2012", "2013", "abc", "2014"]);
        assert_eq!(results.len(), 4);
        assert!(results[0].as_ref().unwrap_err().is_missing_file());
        assert_eq!(results[1].as_ref().unwrap().height(), 3);
        assert!(results[2].as_ref().unwrap_err().is_missing_file());
        // 2014 exists but has no MONTH column.
        assert!(matches!(results[3], Err(Error::Polars(_))));
    }

    #[test]
    fn test_load_years_year_column_uses_label() {
        let dir = tempdir().unwrap();
        write_bz2(dir.path(), "accident_2013.csv.bz2", CSV_2013);
        let loader = RecordLoader::new(dir.path());

        let results = loader.load_years(["2013.0"]);
        let df = results[0].as_ref().unwrap();
        let labels: Vec<Option<&str>> = df
            .column(YEAR_COL)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert!(labels.iter().all(|l| *l == Some("2013.0")));
    }
}
