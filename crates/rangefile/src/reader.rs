//! Read operations for `.rrng` range files

// standard library
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::parsers;
use crate::range::RangeTable;

// external crates
use log::debug;

/// Read a `.rrng` range file into a [RangeTable]
///
/// The file is parsed line-by-line. `Ion<N>=` and `Range<N>=` records
/// are collected in file order; section headers, counts and anything
/// else are ignored. A line that looks like a record but fails its
/// grammar (unparsable numeric fields, missing colour, empty
/// composition) is a hard error, as is a file containing no ranges at
/// all.
///
/// ```rust, no_run
/// # use compspace_rangefile::read_rrng_file;
/// let table = read_rrng_file("./data/R5096.rrng").unwrap();
/// println!("{table}");
/// ```
pub fn read_rrng_file<P: AsRef<Path>>(path: P) -> Result<RangeTable> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }

    let reader = BufReader::new(File::open(path)?);
    let mut table = RangeTable::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if parsers::is_ion_record(line) {
            let (_, ion) = parsers::ion_record(line).map_err(|_| Error::MalformedRecord {
                number: index + 1,
                line: line.to_string(),
            })?;
            table.ions.push(ion);
        } else if parsers::is_range_record(line) {
            let (_, range) = parsers::range_record(line).map_err(|_| Error::MalformedRecord {
                number: index + 1,
                line: line.to_string(),
            })?;
            table.ranges.push(range);
        }
    }

    if table.ranges.is_empty() {
        return Err(Error::NoRanges(path.display().to_string()));
    }

    debug!(
        "Read {} ions and {} ranges from {}",
        table.ions.len(),
        table.ranges.len(),
        path.display()
    );

    Ok(table)
}
