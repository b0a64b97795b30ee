//! Fixed-size cubic voxelisation with bucketed storage

// standard library
use std::collections::BTreeMap;

// crate modules
use crate::container::{AtomRecord, SlabContainer, VoxelContainer, VoxelTable};
use crate::error::{Error, Result};

// external crates
use kdam::{Bar, BarBuilder, BarExt};
use log::{debug, info};

/// Minimum atom count a cube must exceed to be materialised
pub const DEFAULT_OCCUPANCY: usize = 20;

/// Voxel identifiers held under one bucket node
pub const DEFAULT_BUCKET_SIZE: u64 = 100_000;

/// Parameters controlling voxelisation
///
/// The occupancy threshold and bucket capacity are deliberate
/// configuration, not derived values; both default to the values
/// established by existing composition-space datasets.
#[derive(Debug, Clone)]
pub struct VoxelizeOptions {
    /// Cube edge length (nm)
    pub size: f64,
    /// A cube is kept only if its atom count is strictly greater
    pub occupancy: usize,
    /// Consecutive identifiers per storage bucket
    pub bucket_size: u64,
    /// Show a progress bar over slabs
    pub progress: bool,
}

impl Default for VoxelizeOptions {
    fn default() -> Self {
        Self {
            size: 1.0,
            occupancy: DEFAULT_OCCUPANCY,
            bucket_size: DEFAULT_BUCKET_SIZE,
            progress: false,
        }
    }
}

impl VoxelizeOptions {
    /// Check parameters before any processing
    pub fn validate(&self) -> Result<()> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "voxel size must be positive, got {}",
                self.size
            )));
        }
        if self.bucket_size == 0 {
            return Err(Error::InvalidConfiguration(
                "bucket size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Subdivide every slab into fixed-size cubes and bucket the survivors
///
/// Each slab is scanned over its integer-rounded bounding box in
/// nested z → y → x windows of `size`, every window inclusive at both
/// ends. The windowed re-filtering is kept rather than a disjoint
/// floor-division grid because the inclusive bounds assign an atom
/// sitting exactly on a window edge to *both* neighbouring cubes, and
/// voxel membership must match datasets produced with that behaviour.
///
/// Cubes holding strictly more than `occupancy` atoms are materialised
/// and assigned the next dense global identifier, shared across all
/// slabs of the container. Identifiers are grouped under bucket nodes
/// of `bucket_size` so no single node fans out unbounded.
///
/// ```rust, no_run
/// # use compspace_voxel::{read_slab_file, voxelize, VoxelizeOptions};
/// let slabs = read_slab_file("./output/R5096_chunks.slab").unwrap();
///
/// let options = VoxelizeOptions {
///     size: 2.0,
///     ..Default::default()
/// };
/// let container = voxelize(&slabs, &options).unwrap();
/// println!("{container}");
/// ```
pub fn voxelize(slabs: &SlabContainer, options: &VoxelizeOptions) -> Result<VoxelContainer> {
    options.validate()?;

    let size = options.size;
    let mut writer = BucketWriter::new(options.bucket_size);

    let mut progress_bar = init_progress_bar(options);
    if options.progress {
        progress_bar.refresh()?;
    }

    for (index, chunk) in slabs.chunks.iter().enumerate() {
        progress_bar.update(1)?;

        if chunk.is_empty() {
            debug!("chunk_{index} is empty, skipped");
            continue;
        }

        let (x_lo, x_hi) = rounded_extent(chunk, |atom| atom.x);
        let (y_lo, y_hi) = rounded_extent(chunk, |atom| atom.y);
        let (z_lo, z_hi) = rounded_extent(chunk, |atom| atom.z);

        let mut i = z_lo as f64;
        while i < z_hi as f64 {
            let band: Vec<&AtomRecord> = chunk
                .iter()
                .filter(|atom| i <= atom.z && atom.z <= i + size)
                .collect();

            let mut j = y_lo as f64;
            while j < y_hi as f64 && !band.is_empty() {
                let column: Vec<&AtomRecord> = band
                    .iter()
                    .filter(|atom| j <= atom.y && atom.y <= j + size)
                    .copied()
                    .collect();

                let mut k = x_lo as f64;
                while k < x_hi as f64 && !column.is_empty() {
                    let cube: Vec<AtomRecord> = column
                        .iter()
                        .filter(|atom| k <= atom.x && atom.x <= k + size)
                        .map(|atom| **atom)
                        .collect();

                    if cube.len() > options.occupancy {
                        writer.push(cube);
                    }
                    k += size;
                }
                j += size;
            }
            i += size;
        }
    }

    let (buckets, total_voxels) = writer.finish();
    info!(
        "Materialised {total_voxels} voxels from {} chunks",
        slabs.n_chunks()
    );

    let mut columns = slabs.columns.clone();
    columns.push("vox".to_string());

    Ok(VoxelContainer {
        columns,
        species_order: slabs.species_order.clone(),
        bucket_size: options.bucket_size,
        total_voxels,
        buckets,
    })
}

/// Integer-rounded extent of one coordinate over a chunk
fn rounded_extent(chunk: &[AtomRecord], coordinate: impl Fn(&AtomRecord) -> f64) -> (i64, i64) {
    let lo = chunk.iter().map(&coordinate).fold(f64::INFINITY, f64::min);
    let hi = chunk
        .iter()
        .map(&coordinate)
        .fold(f64::NEG_INFINITY, f64::max);
    (lo.round() as i64, hi.round() as i64)
}

/// Accumulator for the running voxel identifier and bucket state
///
/// Identifiers are a single monotonic sequence across all slabs of a
/// file. When `bucket_size` voxels have been written to the current
/// bucket, the writer rolls over to a new bucket keyed by the next
/// identifier threshold.
#[derive(Debug)]
struct BucketWriter {
    bucket_size: u64,
    next_id: u64,
    step: u64,
    current: u64,
    buckets: BTreeMap<u64, BTreeMap<u64, VoxelTable>>,
}

impl BucketWriter {
    fn new(bucket_size: u64) -> Self {
        Self {
            bucket_size,
            next_id: 0,
            step: 0,
            current: 0,
            buckets: BTreeMap::new(),
        }
    }

    /// Store a materialised cube under the next identifier
    fn push(&mut self, atoms: Vec<AtomRecord>) -> u64 {
        if self.step == self.bucket_size {
            self.step = 0;
            self.current += self.bucket_size;
        }

        let id = self.next_id;
        self.buckets
            .entry(self.current)
            .or_default()
            .insert(id, VoxelTable { id, atoms });

        self.next_id += 1;
        self.step += 1;
        id
    }

    /// Final bucket map and the total voxel count
    fn finish(self) -> (BTreeMap<u64, BTreeMap<u64, VoxelTable>>, u64) {
        (self.buckets, self.next_id)
    }
}

/// Initialise the progress bar, if wanted
fn init_progress_bar(options: &VoxelizeOptions) -> Bar {
    BarBuilder::default()
        .unit(" chunks")
        .unit_scale(true)
        .disable(!options.progress)
        .bar_format("{count} chunks [{rate} chunks/s]   ")
        .build()
        .expect("Failed to initialise progress bar")
}

#[cfg(test)]
mod tests {
    use super::*;
    use compspace_utils::f;

    /// Diagonal cluster of `n` atoms near `origin`, one per 0.1 nm
    fn cluster(n: usize, origin: (f64, f64, f64)) -> Vec<AtomRecord> {
        (0..n)
            .map(|step| {
                let offset = 0.1 + 0.1 * step as f64;
                AtomRecord {
                    x: origin.0 + offset,
                    y: origin.1 + offset,
                    z: origin.2 + offset,
                    mass: 10.0,
                    species: Some((step % 2) as u16),
                }
            })
            .collect()
    }

    fn slab_container(chunks: Vec<Vec<AtomRecord>>) -> SlabContainer {
        SlabContainer {
            columns: ["x", "y", "z", "Da", "spec"]
                .iter()
                .map(|c| f!("{c}"))
                .collect(),
            species_order: vec!["Fe:1".to_string(), "O:1".to_string()],
            chunks,
        }
    }

    #[test]
    fn occupancy_threshold_is_strictly_greater() {
        let options = VoxelizeOptions {
            size: 5.0,
            ..Default::default()
        };

        // 21 atoms exceeds the threshold of 20
        let kept = voxelize(&slab_container(vec![cluster(21, (0.0, 0.0, 0.0))]), &options).unwrap();
        assert_eq!(kept.total_voxels, 1);
        assert_eq!(kept.get(0).unwrap().atoms.len(), 21);

        // exactly 20 does not
        let dropped =
            voxelize(&slab_container(vec![cluster(20, (0.0, 0.0, 0.0))]), &options).unwrap();
        assert_eq!(dropped.total_voxels, 0);
    }

    #[test]
    fn identifiers_are_dense_and_ordered() {
        // five well separated clusters along x
        let chunk: Vec<AtomRecord> = (0..5)
            .flat_map(|c| cluster(21, (10.0 * c as f64, 0.0, 0.0)))
            .collect();

        let options = VoxelizeOptions {
            size: 5.0,
            ..Default::default()
        };
        let container = voxelize(&slab_container(vec![chunk]), &options).unwrap();

        assert_eq!(container.total_voxels, 5);
        for id in 0..5 {
            assert_eq!(container.get(id).unwrap().id, id);
        }
        assert!(container.get(5).is_none());
    }

    #[test]
    fn buckets_roll_over_at_capacity() {
        let chunk: Vec<AtomRecord> = (0..5)
            .flat_map(|c| cluster(21, (10.0 * c as f64, 0.0, 0.0)))
            .collect();

        let options = VoxelizeOptions {
            size: 5.0,
            bucket_size: 2,
            ..Default::default()
        };
        let container = voxelize(&slab_container(vec![chunk]), &options).unwrap();

        let keys: Vec<u64> = container.buckets.keys().copied().collect();
        assert_eq!(keys, vec![0, 2, 4]);
        assert_eq!(container.buckets[&0].len(), 2);
        assert_eq!(container.buckets[&2].len(), 2);
        assert_eq!(container.buckets[&4].len(), 1);

        // lookups resolve through the bucket key
        for id in 0..5 {
            assert_eq!(container.get(id).unwrap().id, id);
        }
    }

    #[test]
    fn counter_runs_across_chunks() {
        let first = cluster(25, (0.0, 0.0, 0.0));
        let second = cluster(30, (0.0, 0.0, 20.0));

        let options = VoxelizeOptions {
            size: 5.0,
            ..Default::default()
        };
        let container = voxelize(&slab_container(vec![first, second]), &options).unwrap();

        // the identifier sequence is shared, not reset per chunk
        assert_eq!(container.total_voxels, 2);
        assert_eq!(container.get(1).unwrap().atoms.len(), 30);
    }

    #[test]
    fn vox_column_is_appended() {
        let options = VoxelizeOptions {
            size: 5.0,
            ..Default::default()
        };
        let container = voxelize(&slab_container(vec![]), &options).unwrap();
        assert_eq!(container.columns.last().unwrap(), "vox");
        assert_eq!(container.bucket_size, DEFAULT_BUCKET_SIZE);
    }

    #[test]
    fn invalid_sizes_are_rejected() {
        let slabs = slab_container(vec![]);
        assert!(voxelize(
            &slabs,
            &VoxelizeOptions {
                size: 0.0,
                ..Default::default()
            }
        )
        .is_err());
        assert!(voxelize(
            &slabs,
            &VoxelizeOptions {
                size: -1.0,
                ..Default::default()
            }
        )
        .is_err());
    }
}
