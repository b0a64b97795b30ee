//! Result and Error types for the voxel module

/// Type alias for `Result<T, voxel::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `compspace-voxel`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Failure to serialise or deserialise a container byte stream
    #[error("failed container serialisation")]
    BincodeError(#[from] Box<bincode::ErrorKind>),

    /// Failure to serialise to a JSON string
    #[error("failed serde JSON operation")]
    JSONError(#[from] serde_json::Error),

    /// Unusable stage parameters, caught before any processing
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A voxel identifier missing from its expected bucket
    ///
    /// Indicates a corrupted or incompletely written voxel container,
    /// and is fatal for the aggregation of that file.
    #[error("voxel {voxel} missing from bucket {bucket} (corrupted container)")]
    CorruptedContainer {
        /// Bucket key the identifier resolves to
        bucket: u64,
        /// The missing global voxel identifier
        voxel: u64,
    },
}
