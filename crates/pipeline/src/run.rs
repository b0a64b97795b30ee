//! Per-file stage orchestration and batch runs

// standard library
use std::path::{Path, PathBuf};

// crate modules
use crate::config::Config;
use crate::error::{Error, Result};

// compspace modules
use compspace_cloud::read_pos_file;
use compspace_rangefile::{read_rrng_file, RangeTable};
use compspace_utils::f;
use compspace_voxel::{
    aggregate, chunk_cloud, read_slab_file, read_voxel_file, voxelize, write_composition_file,
    write_slab_file, write_voxel_file,
};

// external crates
use log::{error, info};

/// Explicit container paths for one input file
///
/// Downstream stages receive these handles directly; nothing is ever
/// located by substituting tags inside a filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Slab container written by the chunking stage
    pub slab: PathBuf,
    /// Bucketed voxel container written by the voxelisation stage
    pub voxel: PathBuf,
    /// Composition records written by the aggregation stage
    pub composition: PathBuf,
}

impl Artifacts {
    /// Derive the stage paths for one input file
    ///
    /// The stage is encoded in the name and extension, keyed on the
    /// input file stem:
    ///
    /// ```rust
    /// # use compspace_pipeline::Artifacts;
    /// # use std::path::Path;
    /// let artifacts = Artifacts::for_input(Path::new("out"), Path::new("in/R5096.pos"));
    /// assert_eq!(artifacts.slab, Path::new("out/R5096_chunks.slab"));
    /// assert_eq!(artifacts.voxel, Path::new("out/R5096_voxels.vox"));
    /// assert_eq!(artifacts.composition, Path::new("out/R5096_composition.comp"));
    /// ```
    pub fn for_input(output_dir: &Path, input: &Path) -> Self {
        let stem = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        Self {
            slab: output_dir.join(f!("{stem}_chunks.slab")),
            voxel: output_dir.join(f!("{stem}_voxels.vox")),
            composition: output_dir.join(f!("{stem}_composition.comp")),
        }
    }
}

/// Outcome of a batch run over one input directory
///
/// Input files are independent artifacts, so failures are collected
/// per file rather than aborting the batch.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Successfully processed inputs and their container paths
    pub completed: Vec<(PathBuf, Artifacts)>,
    /// Failed inputs with the rendered failure reason
    pub failed: Vec<(PathBuf, String)>,
}

impl RunSummary {
    /// Check that every input file processed cleanly
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "RunSummary {{ {} completed, {} failed }}",
            self.completed.len(),
            self.failed.len()
        )
    }
}

/// Run all three pipeline stages for a single `.pos` file
///
/// Stages run strictly in order, and every stage completes its
/// container write before the next stage reads it back. Returns the
/// explicit [Artifacts] handles of the written containers.
pub fn process_file(config: &Config, table: &RangeTable, pos_path: &Path) -> Result<Artifacts> {
    let artifacts = Artifacts::for_input(&config.output_path, pos_path);

    // ingest and label
    let cloud = read_pos_file(pos_path)?;
    let labeled = table.label(&cloud);
    info!("{} labeled as {}", pos_path.display(), labeled);

    // coarse z-axis slabs
    let slabs = chunk_cloud(&labeled, config.n_big_slices)?;
    write_slab_file(&slabs, &artifacts.slab)?;

    // fixed-size voxels under bucketed storage
    let slabs = read_slab_file(&artifacts.slab)?;
    let container = voxelize(&slabs, &config.voxelize_options())?;
    write_voxel_file(&container, &artifacts.voxel)?;

    // per-voxel species composition
    let container = read_voxel_file(&artifacts.voxel)?;
    let compositions = aggregate(&container)?;
    write_composition_file(&compositions, &artifacts.composition)?;

    Ok(artifacts)
}

/// Process every `.pos` file in the configured input directory
///
/// The directory must hold the point cloud files and exactly one
/// usable `.rrng` range file, which is shared by every input. Each
/// input file is an independent artifact: a failure is logged and
/// recorded in the summary while the remaining files continue.
///
/// ```rust, no_run
/// # use compspace_pipeline::{run, Config};
/// let config = Config::from_json_file("./config.json").unwrap();
/// let summary = run(&config).unwrap();
///
/// assert!(summary.is_clean());
/// ```
pub fn run(config: &Config) -> Result<RunSummary> {
    config.validate()?;

    if !config.input_path.is_dir() {
        return Err(Error::MissingInputFile(
            config.input_path.display().to_string(),
        ));
    }
    std::fs::create_dir_all(&config.output_path)?;

    let (pos_files, rrng_files) = scan_input_dir(&config.input_path)?;
    let rrng = rrng_files
        .first()
        .ok_or_else(|| Error::NoRangeFile(config.input_path.display().to_string()))?;

    let table = read_rrng_file(rrng)?;
    info!("Using ranges from {}: {table}", rrng.display());

    let mut summary = RunSummary::default();
    for pos_path in pos_files {
        match process_file(config, &table, &pos_path) {
            Ok(artifacts) => {
                info!("Completed {}", pos_path.display());
                summary.completed.push((pos_path, artifacts));
            }
            Err(err) => {
                error!("Failed {}: {err}", pos_path.display());
                summary.failed.push((pos_path, err.to_string()));
            }
        }
    }

    Ok(summary)
}

/// Collect `.pos` and `.rrng` files from the input directory
///
/// Extensions are matched case-insensitively and both lists are
/// sorted by name for deterministic processing order.
fn scan_input_dir(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut pos_files = Vec::new();
    let mut rrng_files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase());

        match extension.as_deref() {
            Some("pos") => pos_files.push(path),
            Some("rrng") => rrng_files.push(path),
            _ => {}
        }
    }

    pos_files.sort();
    rrng_files.sort();
    Ok((pos_files, rrng_files))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_paths_encode_the_stage() {
        let artifacts = Artifacts::for_input(Path::new("/out"), Path::new("/in/sample.v2.pos"));

        // the stem keeps everything before the final extension
        assert_eq!(artifacts.slab, Path::new("/out/sample.v2_chunks.slab"));
        assert_eq!(artifacts.voxel, Path::new("/out/sample.v2_voxels.vox"));
        assert_eq!(
            artifacts.composition,
            Path::new("/out/sample.v2_composition.comp")
        );
    }

    #[test]
    fn summary_reports_clean_runs() {
        let mut summary = RunSummary::default();
        assert!(summary.is_clean());

        summary
            .failed
            .push((PathBuf::from("broken.pos"), "oops".to_string()));
        assert!(!summary.is_clean());
    }
}
