use bzip2::write::BzEncoder;
use bzip2::Compression;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn write_bz2(dir: &Path, name: &str, csv: &str) {
    let file = File::create(dir.join(name)).unwrap();
    let mut encoder = BzEncoder::new(file, Compression::default());
    encoder.write_all(csv.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

/// Two small years in FARS column layout.
pub fn write_two_years(dir: &Path) {
    write_bz2(
        dir,
        "accident_2013.csv.bz2",
        "STATE,ST_CASE,MONTH,DAY,YEAR,LATITUDE,LONGITUD\n\
         1,10001,1,1,2013,34.51,-86.12\n\
         1,10002,1,5,2013,99.9999,999.9999\n\
         1,10003,2,9,2013,32.10,-87.45\n\
         4,40001,2,11,2013,33.42,-112.07\n\
         4,40002,7,4,2013,31.90,999.9999\n",
    );
    write_bz2(
        dir,
        "accident_2014.csv.bz2",
        "STATE,ST_CASE,MONTH,DAY,YEAR,LATITUDE,LONGITUD\n\
         1,10001,2,2,2014,33.00,-86.80\n\
         6,60001,12,24,2014,36.70,-119.80\n",
    );
}
