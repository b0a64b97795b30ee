//! Result and Error types for the cloud module

/// Type alias for `Result<T, cloud::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `compspace-cloud`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// A referenced input file does not exist
    #[error("file \"{0}\" does not exist")]
    FileNotFound(String),

    /// File size is not a whole number of ion records
    #[error("unexpected byte length (file is {found} bytes, record is {record} bytes)")]
    UnexpectedByteLength {
        /// Total bytes found in the file
        found: u64,
        /// Bytes expected per ion record
        record: u64,
    },

    /// Mismatched column lengths given to a constructor
    #[error("mismatched column lengths (x: {x}, y: {y}, z: {z}, mass: {mass})")]
    MismatchedColumns {
        /// Length of the x column
        x: usize,
        /// Length of the y column
        y: usize,
        /// Length of the z column
        z: usize,
        /// Length of the mass-to-charge column
        mass: usize,
    },
}
