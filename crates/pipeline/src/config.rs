//! Run configuration for the pipeline

// standard library
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

// crate modules
use crate::error::{Error, Result};

// compspace modules
use compspace_voxel::{VoxelizeOptions, DEFAULT_BUCKET_SIZE, DEFAULT_OCCUPANCY};

// external crates
use serde::{Deserialize, Serialize};

/// Recognised options for one pipeline run
///
/// Loaded from a JSON file or built directly by an external driver.
/// Only the paths, slab count and voxel size are required; threshold
/// and bucket capacity fall back to the established defaults.
///
/// ```json
/// {
///     "input_path": "./data",
///     "output_path": "./output",
///     "n_big_slices": 30,
///     "voxel_size": 2.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `.pos` point clouds and one `.rrng` file
    pub input_path: PathBuf,
    /// Directory for the generated stage containers
    pub output_path: PathBuf,
    /// Number of coarse z-axis slabs per input file
    pub n_big_slices: usize,
    /// Voxel cube edge length (nm)
    pub voxel_size: f64,
    /// Occupancy a cube must exceed to be materialised
    #[serde(default = "default_occupancy")]
    pub voxel_occupancy: usize,
    /// Consecutive voxel identifiers per storage bucket
    #[serde(default = "default_bucket_size")]
    pub bucket_size: u64,
    /// Show progress bars during long scans
    #[serde(default)]
    pub progress: bool,
}

fn default_occupancy() -> usize {
    DEFAULT_OCCUPANCY
}

fn default_bucket_size() -> u64 {
    DEFAULT_BUCKET_SIZE
}

impl Config {
    /// Read a configuration from a JSON file
    ///
    /// ```rust, no_run
    /// # use compspace_pipeline::Config;
    /// let config = Config::from_json_file("./config.json").unwrap();
    /// config.validate().unwrap();
    /// ```
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingInputFile(path.display().to_string()));
        }

        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Check run parameters before any processing
    pub fn validate(&self) -> Result<()> {
        if self.n_big_slices == 0 {
            return Err(Error::InvalidConfiguration(
                "n_big_slices must be positive".to_string(),
            ));
        }
        if !self.voxel_size.is_finite() || self.voxel_size <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "voxel_size must be positive, got {}",
                self.voxel_size
            )));
        }
        Ok(())
    }

    /// Voxelisation parameters implied by this configuration
    pub fn voxelize_options(&self) -> VoxelizeOptions {
        VoxelizeOptions {
            size: self.voxel_size,
            occupancy: self.voxel_occupancy,
            bucket_size: self.bucket_size,
            progress: self.progress,
        }
    }
}
