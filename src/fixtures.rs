//! Test fixtures: small accident files written into temp directories.

use bzip2::write::BzEncoder;
use bzip2::Compression;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub fn write_bz2(dir: &Path, name: &str, csv: &str) {
    let file = File::create(dir.join(name)).unwrap();
    let mut encoder = BzEncoder::new(file, Compression::default());
    encoder.write_all(csv.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

pub fn write_plain(dir: &Path, name: &str, csv: &str) {
    fs::write(dir.join(name), csv).unwrap();
}
