//! Per-voxel species composition aggregation

// crate modules
use crate::container::{CompositionContainer, CompositionRecord, VoxelContainer};
use crate::error::{Error, Result};

// external crates
use log::info;

/// Compute the species composition of every voxel in a container
///
/// Walks the full identifier range `0..total_voxels` in order. For
/// each voxel the bucket key is derived from the identifier, the atom
/// table fetched, and the fractional count of every known species
/// computed against the voxel's total atom count.
///
/// A missing bucket or identifier means the container was corrupted
/// or incompletely written, and fails the whole aggregation with
/// [Error::CorruptedContainer] rather than skipping silently.
///
/// The output is deterministic: aggregating the same container twice
/// yields identical records in identical order.
///
/// ```rust, no_run
/// # use compspace_voxel::{aggregate, read_voxel_file};
/// let container = read_voxel_file("./output/R5096_voxels.vox").unwrap();
///
/// let compositions = aggregate(&container).unwrap();
/// println!("{compositions}");
/// ```
pub fn aggregate(container: &VoxelContainer) -> Result<CompositionContainer> {
    let n_species = container.species_order.len();
    let mut records = Vec::with_capacity(container.total_voxels as usize);

    for id in 0..container.total_voxels {
        let table = container.get(id).ok_or(Error::CorruptedContainer {
            bucket: container.bucket_of(id),
            voxel: id,
        })?;

        let total_atoms = table.atoms.len() as u64;
        let mut counts = vec![0u64; n_species];
        for atom in &table.atoms {
            // unlabeled ions count toward the total only
            if let Some(species) = atom.species {
                counts[species as usize] += 1;
            }
        }

        let fractions = counts
            .iter()
            .map(|&count| count as f64 / total_atoms as f64)
            .collect();

        records.push(CompositionRecord {
            fractions,
            total_atoms,
            voxel: id,
        });
    }

    info!("Aggregated {} voxel compositions", records.len());

    let mut columns = container.species_order.clone();
    columns.push("Total_no".to_string());
    columns.push("vox".to_string());

    Ok(CompositionContainer {
        columns,
        species_order: container.species_order.clone(),
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{AtomRecord, VoxelTable};
    use std::collections::BTreeMap;

    /// Container of one bucket with `tables` voxels of given species
    fn container(tables: Vec<Vec<Option<u16>>>) -> VoxelContainer {
        let mut buckets: BTreeMap<u64, BTreeMap<u64, VoxelTable>> = BTreeMap::new();
        let total_voxels = tables.len() as u64;

        for (id, species_list) in tables.into_iter().enumerate() {
            let atoms = species_list
                .into_iter()
                .map(|species| AtomRecord {
                    species,
                    ..Default::default()
                })
                .collect();
            buckets.entry(0).or_default().insert(
                id as u64,
                VoxelTable {
                    id: id as u64,
                    atoms,
                },
            );
        }

        VoxelContainer {
            columns: vec![],
            species_order: vec!["Fe:1".to_string(), "O:1".to_string()],
            bucket_size: 100_000,
            total_voxels,
            buckets,
        }
    }

    #[test]
    fn fractions_sum_to_one_when_fully_labeled() {
        let result = aggregate(&container(vec![vec![
            Some(0),
            Some(0),
            Some(1),
            Some(0),
        ]]))
        .unwrap();

        let record = &result.records[0];
        assert_eq!(record.total_atoms, 4);
        assert_eq!(record.fractions, vec![0.75, 0.25]);
        assert!((record.labelled_fraction_sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unlabeled_atoms_reduce_the_sum() {
        let result = aggregate(&container(vec![vec![Some(0), None, Some(1), None]])).unwrap();

        let record = &result.records[0];
        assert_eq!(record.total_atoms, 4);
        assert_eq!(record.fractions, vec![0.25, 0.25]);
        assert!((record.labelled_fraction_sum() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn records_follow_identifier_order() {
        let result = aggregate(&container(vec![
            vec![Some(0)],
            vec![Some(1)],
            vec![Some(0), Some(1)],
        ]))
        .unwrap();

        let ids: Vec<u64> = result.records.iter().map(|r| r.voxel).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(result.columns, vec!["Fe:1", "O:1", "Total_no", "vox"]);
    }

    #[test]
    fn missing_identifier_is_fatal() {
        let mut broken = container(vec![vec![Some(0)], vec![Some(1)]]);
        broken.buckets.get_mut(&0).unwrap().remove(&1);

        let result = aggregate(&broken);
        assert!(matches!(
            result,
            Err(Error::CorruptedContainer { bucket: 0, voxel: 1 })
        ));
    }

    #[test]
    fn aggregation_is_deterministic() {
        let input = container(vec![vec![Some(0), Some(1)], vec![Some(1), None]]);

        let first = aggregate(&input).unwrap();
        let second = aggregate(&input).unwrap();

        let a = bincode::serialize(&first.records).unwrap();
        let b = bincode::serialize(&second.records).unwrap();
        assert_eq!(a, b);
    }
}
