//! Result and Error types for the rangefile module

/// Type alias for `Result<T, rangefile::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `compspace-rangefile`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// A referenced input file does not exist
    #[error("file \"{0}\" does not exist")]
    FileNotFound(String),

    /// A record line that could not be parsed
    #[error("malformed record on line {number}: \"{line}\"")]
    MalformedRecord {
        /// 1-based line number in the range file
        number: usize,
        /// The offending line
        line: String,
    },

    /// A range file with no usable Range records
    #[error("no ranges found in \"{0}\"")]
    NoRanges(String),
}
