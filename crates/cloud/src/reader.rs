//! Simple read operations for vendor `.pos` binary files
//!
//! The file is a headerless sequence of 16 byte ion records, each four
//! big-endian IEEE 754 single-precision floats: x, y, z (nm) and the
//! mass-to-charge ratio (Da).

// standard library
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// crate modules
use crate::cloud::{PointCloud, RawAtom};
use crate::error::{Error, Result};

// external crates
use log::debug;

/// Bytes per ion record: four 32-bit floats
const RECORD_BYTES: u64 = 16;

/// Read a vendor `.pos` file into a [PointCloud]
///
/// Returns a Result containing the full cloud of detected ions in
/// detection order. Fails if the path does not exist or if the file
/// size is not a whole number of 16 byte records.
///
/// ```rust, no_run
/// # use compspace_cloud::read_pos_file;
/// // Read a position file
/// let cloud = read_pos_file("./data/R5096_52841.pos").unwrap();
///
/// // Print a summary of the data
/// println!("{cloud}");
/// ```
pub fn read_pos_file<P: AsRef<Path>>(path: P) -> Result<PointCloud> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }

    let n_bytes = path.metadata()?.len();
    if n_bytes % RECORD_BYTES != 0 {
        return Err(Error::UnexpectedByteLength {
            found: n_bytes,
            record: RECORD_BYTES,
        });
    }

    let mut reader = BufReader::new(File::open(path)?);
    let atoms = parse_records(&mut reader, (n_bytes / RECORD_BYTES) as usize)?;
    debug!("Read {} ions from {}", atoms.len(), path.display());

    Ok(PointCloud { atoms })
}

/// Collect `n_records` ion records from a byte stream
fn parse_records<R: Read>(reader: &mut R, n_records: usize) -> Result<Vec<RawAtom>> {
    let mut buffer = [0u8; RECORD_BYTES as usize];
    let mut atoms = Vec::with_capacity(n_records);

    for _ in 0..n_records {
        reader.read_exact(&mut buffer)?;
        atoms.push(decode_record(&buffer));
    }

    Ok(atoms)
}

/// Decode one big-endian record into a [RawAtom]
fn decode_record(buffer: &[u8; 16]) -> RawAtom {
    // Fixed-size slices, so try_into is guaranteed to succeed
    let field = |i: usize| -> f64 {
        f32::from_be_bytes(buffer[4 * i..4 * i + 4].try_into().unwrap()) as f64
    };

    RawAtom {
        x: field(0),
        y: field(1),
        z: field(2),
        mass: field(3),
    }
}
