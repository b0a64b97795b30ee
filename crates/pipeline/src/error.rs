//! Result and Error types for the pipeline module

/// Type alias for `Result<T, pipeline::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `compspace-pipeline`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Failure to parse the JSON configuration
    #[error("failed to parse configuration")]
    JSONError(#[from] serde_json::Error),

    /// Error from point cloud loading
    #[error("point cloud error")]
    CloudError(#[from] compspace_cloud::Error),

    /// Error from range file parsing or labeling
    #[error("range file error")]
    RangeError(#[from] compspace_rangefile::Error),

    /// Error from chunking, voxelisation or aggregation
    #[error("voxel stage error")]
    VoxelError(#[from] compspace_voxel::Error),

    /// A referenced path that does not exist
    #[error("input path \"{0}\" does not exist")]
    MissingInputFile(String),

    /// No `.rrng` range file found in the input directory
    #[error("no .rrng range file found in \"{0}\"")]
    NoRangeFile(String),

    /// Unusable run parameters, caught before any processing
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
