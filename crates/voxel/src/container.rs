//! Hierarchical container types persisted between pipeline stages
//!
//! Every stage writes one self-describing container per input file.
//! Containers carry their own column order and the species ordering of
//! the range table that labeled the cloud, so downstream stages never
//! depend on out-of-band context.

// standard library
use std::collections::BTreeMap;

// compspace modules
use compspace_rangefile::LabeledAtom;
use compspace_utils::{f, FractionExt};

// external crates
use serde::{Deserialize, Serialize};

/// Column order shared by slab and voxel atom tables
pub(crate) const ATOM_COLUMNS: [&str; 5] = ["x", "y", "z", "Da", "spec"];

/// One stored atom row: position, mass-to-charge and species index
///
/// The species is an index into the owning container's
/// `species_order`, or `None` for ions that matched no range.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtomRecord {
    /// x coordinate (nm)
    pub x: f64,
    /// y coordinate (nm)
    pub y: f64,
    /// z coordinate (nm)
    pub z: f64,
    /// Mass-to-charge ratio (Da)
    pub mass: f64,
    /// Index into the container species ordering
    pub species: Option<u16>,
}

impl From<&LabeledAtom> for AtomRecord {
    fn from(atom: &LabeledAtom) -> Self {
        Self {
            x: atom.x,
            y: atom.y,
            z: atom.z,
            mass: atom.mass,
            species: atom.species,
        }
    }
}

/// Ordered z-axis slabs of one labeled point cloud
///
/// Slabs cover the full z extent contiguously and are addressable by
/// index (`chunk_0`, `chunk_1`, ... in the original layout). Ions on
/// a shared slab boundary appear in both neighbouring slabs.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SlabContainer {
    /// Column order of the atom tables
    pub columns: Vec<String>,
    /// Sorted species labels defining the species index space
    pub species_order: Vec<String>,
    /// Atom tables in slab order along z
    pub chunks: Vec<Vec<AtomRecord>>,
}

impl SlabContainer {
    /// Number of slabs in the container
    pub fn n_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// Total stored atom rows, counting boundary duplicates
    pub fn n_atoms(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }
}

impl std::fmt::Display for SlabContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "SlabContainer {{ {} chunks, {} atoms, {} species }}",
            self.n_chunks(),
            self.n_atoms(),
            self.species_order.len()
        )
    }
}

/// The atom table of one materialised voxel
///
/// Carries its own global identifier so that a table read from any
/// bucket is self-identifying.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoxelTable {
    /// Global voxel identifier
    pub id: u64,
    /// Atoms inside the voxel cube
    pub atoms: Vec<AtomRecord>,
}

/// All materialised voxels of one input file, bucketed by identifier
///
/// Voxel identifiers are dense in `[0, total_voxels)`. Storage is
/// partitioned into buckets of `bucket_size` consecutive identifiers
/// to bound the entries held under any one container node; the bucket
/// key for a voxel is a pure function of its identifier (see
/// [VoxelContainer::bucket_of]).
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VoxelContainer {
    /// Column order of the atom tables
    pub columns: Vec<String>,
    /// Sorted species labels defining the species index space
    pub species_order: Vec<String>,
    /// Identifier capacity of each bucket
    pub bucket_size: u64,
    /// Total number of materialised voxels
    pub total_voxels: u64,
    /// Voxel tables keyed by bucket, then by global identifier
    pub buckets: BTreeMap<u64, BTreeMap<u64, VoxelTable>>,
}

impl VoxelContainer {
    /// Bucket key for a global voxel identifier
    ///
    /// ```rust
    /// # use compspace_voxel::VoxelContainer;
    /// let container = VoxelContainer {
    ///     bucket_size: 100_000,
    ///     ..Default::default()
    /// };
    ///
    /// assert_eq!(container.bucket_of(0), 0);
    /// assert_eq!(container.bucket_of(99_999), 0);
    /// assert_eq!(container.bucket_of(100_000), 100_000);
    /// assert_eq!(container.bucket_of(250_000), 200_000);
    /// ```
    pub fn bucket_of(&self, id: u64) -> u64 {
        (id / self.bucket_size) * self.bucket_size
    }

    /// Fetch the atom table for a global voxel identifier
    pub fn get(&self, id: u64) -> Option<&VoxelTable> {
        self.buckets
            .get(&self.bucket_of(id))
            .and_then(|bucket| bucket.get(&id))
    }

    /// Number of buckets currently holding voxels
    pub fn n_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Total stored atom rows across all voxels
    pub fn n_atoms(&self) -> usize {
        self.buckets
            .values()
            .flat_map(|bucket| bucket.values())
            .map(|voxel| voxel.atoms.len())
            .sum()
    }
}

impl std::fmt::Display for VoxelContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "VoxelContainer {{ {} voxels, {} buckets, {} atoms }}",
            self.total_voxels,
            self.n_buckets(),
            self.n_atoms()
        )
    }
}

/// Species fractions and atom count for one voxel
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionRecord {
    /// Fractional abundance per species, in species order
    pub fractions: Vec<f64>,
    /// Total atoms in the voxel, labeled or not
    pub total_atoms: u64,
    /// Global voxel identifier
    pub voxel: u64,
}

impl CompositionRecord {
    /// Sum of the per-species fractions
    ///
    /// This is 1.0 (within float tolerance) only when every ion in the
    /// voxel carries a species label. Unlabeled ions count toward
    /// `total_atoms` but contribute to no fraction, so the sum falls
    /// short of 1.0 by exactly their share.
    pub fn labelled_fraction_sum(&self) -> f64 {
        self.fractions.iter().sum()
    }
}

impl std::fmt::Display for CompositionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let fractions = self
            .fractions
            .iter()
            .map(|fraction| fraction.pct(1))
            .collect::<Vec<String>>()
            .join(" ");

        write!(
            f,
            "{:<8} {} ({} atoms)",
            self.voxel, fractions, self.total_atoms
        )
    }
}

/// The definitive output artifact: one composition row per voxel
///
/// Records are ordered by voxel identifier. Column order is the
/// species labels, then the total atom count, then the identifier.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CompositionContainer {
    /// Column order of the records
    pub columns: Vec<String>,
    /// Sorted species labels the fractions refer to
    pub species_order: Vec<String>,
    /// One record per voxel, in identifier order
    pub records: Vec<CompositionRecord>,
}

impl CompositionContainer {
    /// Number of composition records
    pub fn n_records(&self) -> usize {
        self.records.len()
    }
}

impl std::fmt::Display for CompositionContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = f!(
            "CompositionContainer {{ {} records, species [{}] }}",
            self.n_records(),
            self.species_order.join(", ")
        );

        for record in self.records.iter().take(10) {
            s += &f!("\n  {record}");
        }
        if self.n_records() > 10 {
            s += &f!("\n  ... and {} more", self.n_records() - 10);
        }

        write!(f, "{}", s)
    }
}
