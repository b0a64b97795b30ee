//! Coarse z-axis slab partitioning of a labeled cloud

// crate modules
use crate::container::{AtomRecord, SlabContainer, ATOM_COLUMNS};
use crate::error::{Error, Result};

// compspace modules
use compspace_rangefile::LabeledCloud;
use compspace_utils::{f, ValueExt};

// external crates
use log::debug;

/// Partition a labeled cloud into `n_slabs` ordered z-axis slabs
///
/// Atoms are sorted by z and sliced into `n_slabs` windows of equal
/// width Δ = (z_max − z_min) / n_slabs. Windows are inclusive at both
/// ends, so an ion sitting exactly on a shared boundary appears in
/// both neighbouring slabs; interior ions appear in exactly one.
///
/// Fails with [Error::InvalidConfiguration] before any processing if
/// the slab count is zero or the cloud is empty.
///
/// ```rust
/// # use compspace_rangefile::{LabeledAtom, LabeledCloud};
/// # use compspace_voxel::chunk_cloud;
/// let cloud = LabeledCloud {
///     atoms: (0..100)
///         .map(|n| LabeledAtom {
///             z: n as f64,
///             species: Some(0),
///             ..Default::default()
///         })
///         .collect(),
///     species_order: vec!["Fe:1".to_string()],
///     species_colours: vec!["#FF0000".to_string()],
/// };
///
/// let slabs = chunk_cloud(&cloud, 4).unwrap();
/// assert_eq!(slabs.n_chunks(), 4);
/// ```
pub fn chunk_cloud(cloud: &LabeledCloud, n_slabs: usize) -> Result<SlabContainer> {
    if n_slabs == 0 {
        return Err(Error::InvalidConfiguration(
            "number of slabs must be positive".to_string(),
        ));
    }
    if cloud.is_empty() {
        return Err(Error::InvalidConfiguration(
            "point cloud is empty".to_string(),
        ));
    }

    let mut atoms: Vec<AtomRecord> = cloud.atoms.iter().map(AtomRecord::from).collect();
    atoms.sort_by(|a, b| a.z.total_cmp(&b.z));

    // sorted, so the extent is just the first and last rows
    let z_min = atoms.first().unwrap().z;
    let z_max = atoms.last().unwrap().z;
    let delta = (z_max - z_min) / n_slabs as f64;

    let mut chunks = Vec::with_capacity(n_slabs);
    for i in 0..n_slabs {
        let start = z_min + delta * i as f64;
        let end = match i == n_slabs - 1 {
            // guard against rounding dropping the topmost atom
            true => z_max.max(start + delta),
            false => start + delta,
        };

        let chunk: Vec<AtomRecord> = atoms
            .iter()
            .filter(|atom| start <= atom.z && atom.z <= end)
            .copied()
            .collect();

        debug!(
            "chunk_{i}: {} atoms in [{}, {}]",
            chunk.len(),
            start.sci(5, 2),
            end.sci(5, 2)
        );
        chunks.push(chunk);
    }

    Ok(SlabContainer {
        columns: ATOM_COLUMNS.iter().map(|c| f!("{c}")).collect(),
        species_order: cloud.species_order.clone(),
        chunks,
    })
}
